//! ### M2M file system
//!
//! LwM2M object descriptions are XML files the client loads from the
//! `/XML` directory of the module file system.
pub mod responses;

use core::cell::Cell;

use atat::{
    atat_derive::AtatCmd,
    digest::ParseError,
    AtatCmd, InternalError,
};
use heapless::Vec;
use responses::{FileListing, LISTING_BUF_LEN};

use super::{write_cmd_fmt, NoResponse, MAX_FILE_PATH_LEN};

/// Directory the LwM2M client reads object descriptions from.
pub const OBJECT_DIRECTORY: &str = "/XML";

/// Largest object description that can be uploaded in one payload.
pub const OBJECT_DATA_MAX_LEN: usize = 2048;

/// List directory #M2MLIST
#[derive(Clone)]
pub struct ListFiles<'a> {
    pub directory: &'a str,
}

impl AtatCmd for ListFiles<'_> {
    type Response = FileListing;

    const MAX_LEN: usize = 16 + MAX_FILE_PATH_LEN;
    const MAX_TIMEOUT_MS: u32 = 5000;

    fn write(&self, buf: &mut [u8]) -> usize {
        write_cmd_fmt(buf, format_args!("AT#M2MLIST={}\r\n", self.directory))
    }

    fn parse(&self, resp: Result<&[u8], InternalError>) -> Result<Self::Response, atat::Error> {
        let resp = resp?;
        let len = resp.len().min(LISTING_BUF_LEN);
        let raw = Vec::from_slice(&resp[..len]).map_err(|_| atat::Error::Parse)?;
        Ok(FileListing { raw })
    }
}

/// Write file #M2MWRITE
///
/// Announces an upload of `size` bytes to `path`. The module answers with a
/// `>>>` prompt and then expects exactly `size` bytes of [`ObjectData`].
#[derive(Clone, AtatCmd)]
#[at_cmd("#M2MWRITE", NoResponse, attempts = 1, timeout_ms = 5000)]
pub struct PrepareObjectWrite<'a> {
    #[at_arg(position = 0, len = 128)]
    pub path: &'a str,
    #[at_arg(position = 1)]
    pub size: usize,
}

/// Raw object payload following the `#M2MWRITE` prompt. Written as is,
/// without `AT` prefix or line terminator.
#[derive(Clone)]
pub struct ObjectData<'a> {
    data: &'a [u8],
    written: Cell<usize>,
}

impl<'a> ObjectData<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            written: Cell::new(0),
        }
    }

    /// Bytes copied into the egress buffer by the last write.
    pub fn written(&self) -> usize {
        self.written.get()
    }
}

impl AtatCmd for ObjectData<'_> {
    type Response = NoResponse;

    const MAX_LEN: usize = OBJECT_DATA_MAX_LEN;
    const MAX_TIMEOUT_MS: u32 = 10000;
    const ATTEMPTS: u8 = 1;

    fn write(&self, buf: &mut [u8]) -> usize {
        let len = self.data.len().min(buf.len());
        buf[..len].copy_from_slice(&self.data[..len]);
        self.written.set(len);
        len
    }

    fn parse(&self, resp: Result<&[u8], InternalError>) -> Result<Self::Response, atat::Error> {
        resp?;
        Ok(NoResponse)
    }
}

/// Matches the `>>>` prompt `#M2MWRITE` answers with, for
/// [`atat::AtDigester::with_custom_prompt`]. The generic prompt parser only
/// knows single character prompts.
pub fn m2mwrite_prompt(buf: &[u8]) -> Result<(u8, usize), ParseError> {
    const PROMPT: &[u8] = b">>>";

    let start = buf
        .iter()
        .position(|c| !matches!(c, b'\r' | b'\n'))
        .ok_or(ParseError::NoMatch)?;
    let rest = &buf[start..];

    if rest.len() < PROMPT.len() {
        return if PROMPT.starts_with(rest) {
            Err(ParseError::Incomplete)
        } else {
            Err(ParseError::NoMatch)
        };
    }
    if !rest.starts_with(PROMPT) {
        return Err(ParseError::NoMatch);
    }

    let mut len = start + PROMPT.len();
    if buf.get(len) == Some(&b' ') {
        len += 1;
    }
    Ok((b'>', len))
}
