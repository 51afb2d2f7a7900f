//! AT Commands for the Telit ME310 embedded LwM2M client (OneEdge) and the
//! IPEasy data contexts\
//! Following the Telit ME310G1 AT Commands Reference Guide and the LwM2M
//! User Guide

pub mod fields;
pub mod file_system;
pub mod ip_easy;
pub mod lwm2m;
pub mod urc;

use atat::{
    atat_derive::{AtatCmd, AtatResp},
    AtDigester,
};

pub use urc::Urc;

/// Longest file path the modem reports or accepts, including the directory.
pub const MAX_FILE_PATH_LEN: usize = 128;

/// Longest state, type or event string carried by an LwM2M URC.
pub const CLIENT_STATE_MAX_LEN: usize = 64;

/// Ingress digester for the ME310.
///
/// Recognises the LwM2M URCs through [`Urc`] and the `>>>` upload prompt of
/// `#M2MWRITE`, which the default digester does not. Build the atat ingress
/// with it:
///
/// ```ignore
/// let ingress = atat::Ingress::new(digester(), &mut ingress_buf, &RES_SLOT, &URC_CHANNEL);
/// ```
pub fn digester() -> AtDigester<Urc> {
    AtDigester::<Urc>::new().with_custom_prompt(file_system::m2mwrite_prompt)
}

#[derive(Debug, Clone, AtatResp)]
pub struct NoResponse;

#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse)]
pub struct AT;

/// Copy a preformatted command into the egress buffer.
pub(crate) fn write_cmd(buf: &mut [u8], cmd: &[u8]) -> usize {
    let len = cmd.len().min(buf.len());
    buf[..len].copy_from_slice(&cmd[..len]);
    len
}

/// Format a command into the egress buffer. Output that does not fit is cut
/// at the end of the buffer.
pub(crate) fn write_cmd_fmt(buf: &mut [u8], args: core::fmt::Arguments) -> usize {
    struct Cursor<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl core::fmt::Write for Cursor<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let end = (self.pos + s.len()).min(self.buf.len());
            let len = end - self.pos;
            self.buf[self.pos..end].copy_from_slice(&s.as_bytes()[..len]);
            self.pos = end;
            if len < s.len() {
                Err(core::fmt::Error)
            } else {
                Ok(())
            }
        }
    }

    let mut cursor = Cursor { buf, pos: 0 };
    // A cut command is rejected by the modem, nothing to report here
    let _ = core::fmt::Write::write_fmt(&mut cursor, args);
    cursor.pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use atat::{DigestResult, Digester};

    #[test]
    fn digest_upload_prompt() {
        let mut digester = digester();
        let (result, len) = digester.digest(b"\r\n>>>");
        assert!(matches!(result, DigestResult::Prompt(b'>')));
        assert!(len >= 3);
    }

    #[test]
    fn digest_lwm2m_urc() {
        let mut digester = digester();
        let (result, _) = digester.digest(b"\r\n#LWM2MEND: 0\r\n");
        assert!(matches!(result, DigestResult::Urc(b"#LWM2MEND: 0")));
    }
}
