//! Responses for File system Commands
use atat::AtatResp;
use heapless::{String, Vec};

use crate::command::{fields, MAX_FILE_PATH_LEN};

/// Size of the buffer holding a `#M2MLIST` reply.
pub const LISTING_BUF_LEN: usize = 1024;

/// Directory listing #M2MLIST
///
/// The reply body is kept as received; [`FileListing::entries`] walks its
/// `#M2MLIST:` lines lazily. A listing longer than [`LISTING_BUF_LEN`] is cut
/// at the buffer end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListing {
    pub raw: Vec<u8, LISTING_BUF_LEN>,
}

impl AtatResp for FileListing {}

impl FileListing {
    /// First field of every listing line, in reply order. Lines whose first
    /// field is not text are skipped.
    pub fn entries(&self) -> impl Iterator<Item = String<MAX_FILE_PATH_LEN>> + '_ {
        fields::lines(&self.raw, b"#M2MLIST:").filter_map(|mut line| line.read_string().ok())
    }
}
