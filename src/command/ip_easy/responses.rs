//! Responses for IPEasy context Commands
use atat::AtatResp;
use heapless::Vec;

use super::types::{ContextId, ContextStatus, CONTEXT_MAX};
use crate::command::fields;

/// Size of the buffer holding a `#SGACT?` reply.
pub const CONTEXT_LISTING_LEN: usize = 256;

/// One `#SGACT: <cid>,<stat>` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ContextActivation {
    pub cid: ContextId,
    pub status: ContextStatus,
}

/// Context listing as received. Lines are decoded on demand, so a malformed
/// slot only hides itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextActivations {
    pub raw: Vec<u8, CONTEXT_LISTING_LEN>,
}

impl AtatResp for ContextActivations {}

impl ContextActivations {
    /// Well formed slots in listing order, at most [`CONTEXT_MAX`] lines
    /// are looked at.
    pub fn iter(&self) -> impl Iterator<Item = ContextActivation> + '_ {
        fields::lines(&self.raw, b"#SGACT:")
            .take(CONTEXT_MAX)
            .filter_map(|mut line| {
                let cid = line.read_int().ok()?;
                let stat = line.read_int().ok()?;
                Some(ContextActivation {
                    cid: ContextId(u8::try_from(cid).ok()?),
                    status: ContextStatus::from(stat),
                })
            })
    }

    /// Status of the first listed slot carrying `cid`. Scanning stops there.
    pub fn status(&self, cid: ContextId) -> Option<ContextStatus> {
        self.iter().find(|c| c.cid == cid).map(|c| c.status)
    }
}
