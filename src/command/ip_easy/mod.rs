//! ### 5.x - IPEasy context activation
//!
//! The ME310 runs its own TCP/IP stack on top of PDP contexts. A context has
//! to be activated with `#SGACT` before the embedded LwM2M client can reach
//! its server through it.
pub mod responses;
pub mod types;

use atat::{atat_derive::AtatCmd, AtatCmd, InternalError};
use heapless::Vec;
use responses::{ContextActivations, CONTEXT_LISTING_LEN};
use types::{ContextId, ContextStatus};

use super::{write_cmd, NoResponse};

/// Context activation #SGACT
///
/// Activates or deactivates the specified PDP context, establishing the
/// connection with the network. The command may take up to 150 s to answer
/// while the network negotiates the bearer.
#[derive(Clone, AtatCmd)]
#[at_cmd("#SGACT", NoResponse, attempts = 1, timeout_ms = 150000)]
pub struct SetContextActivation {
    #[at_arg(position = 0)]
    pub cid: ContextId,
    #[at_arg(position = 1)]
    pub status: ContextStatus,
}

/// Read context activation state #SGACT?
///
/// Lists one `#SGACT: <cid>,<stat>` line per context slot. The reply is kept
/// as received and walked by [`ContextActivations::status`].
#[derive(Clone)]
pub struct GetContextActivation;

impl AtatCmd for GetContextActivation {
    type Response = ContextActivations;

    const MAX_LEN: usize = 12;
    const MAX_TIMEOUT_MS: u32 = 1000;

    fn write(&self, buf: &mut [u8]) -> usize {
        write_cmd(buf, b"AT#SGACT?\r\n")
    }

    fn parse(&self, resp: Result<&[u8], InternalError>) -> Result<Self::Response, atat::Error> {
        let resp = resp?;
        let len = resp.len().min(CONTEXT_LISTING_LEN);
        let raw = Vec::from_slice(&resp[..len]).map_err(|_| atat::Error::Parse)?;
        Ok(ContextActivations { raw })
    }
}
