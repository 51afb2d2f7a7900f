//! Unsolicited result code recognition
//!
//! The LwM2M URCs are not fixed-shape `+NAME: ...` lines the derive macros
//! handle well (one of them does not even start with `#`), so whole lines
//! matching a known prefix are captured and decoded later by the URC handler.
use atat::digest::{ParseError, Parser};
use heapless::Vec;

use super::fields::trim;

pub const CLIENT_STATE_PREFIX: &[u8] = b"LWM2M-TLT:";
pub const RING_PREFIX: &[u8] = b"#LWM2MRING:";
pub const SESSION_END_PREFIX: &[u8] = b"#LWM2MEND:";
pub const INFO_PREFIX: &[u8] = b"#LWM2MINFO:";

pub const URC_PREFIXES: [&[u8]; 4] = [CLIENT_STATE_PREFIX, RING_PREFIX, SESSION_END_PREFIX, INFO_PREFIX];

/// Longest URC line kept, terminator excluded.
pub const URC_LINE_MAX: usize = 160;

/// A URC line starting with one of [`URC_PREFIXES`]. Content beyond
/// [`URC_LINE_MAX`] bytes is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urc {
    line: Vec<u8, URC_LINE_MAX>,
}

impl Urc {
    pub fn new(line: &[u8]) -> Self {
        let line = trim(line);
        let len = line.len().min(URC_LINE_MAX);
        let mut buf = Vec::new();
        // Cannot fail, `len` is bounded by the capacity
        let _ = buf.extend_from_slice(&line[..len]);
        Self { line: buf }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.line
    }
}

impl atat::AtatUrc for Urc {
    type Response = Self;

    fn parse(resp: &[u8]) -> Option<Self::Response> {
        let line = trim(resp);
        URC_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
            .then(|| Self::new(line))
    }
}

impl Parser for Urc {
    fn parse(buf: &[u8]) -> Result<(&[u8], usize), ParseError> {
        let start = buf
            .iter()
            .position(|c| !matches!(c, b'\r' | b'\n'))
            .ok_or(ParseError::Incomplete)?;
        let line = &buf[start..];

        if !URC_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            return if URC_PREFIXES.iter().any(|prefix| prefix.starts_with(line)) {
                Err(ParseError::Incomplete)
            } else {
                Err(ParseError::NoMatch)
            };
        }

        let end = line
            .windows(2)
            .position(|w| w == b"\r\n")
            .ok_or(ParseError::Incomplete)?;

        Ok((&line[..end], start + end + 2))
    }
}
