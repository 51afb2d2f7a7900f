//! ### LwM2M client (Telit OneEdge)
//!
//! The ME310 embeds a LwM2M client. The host enables it on an IPEasy
//! context, writes resource values, creates object instances and answers
//! server requests, always addressing objects by numeric ids.
pub mod responses;
pub mod types;
pub mod urc;

use atat::{atat_derive::AtatCmd, AtatCmd, InternalError};
use responses::{ClientEnableStatus, ResourceValue};
use types::{AckAction, AckMode, ClientMode, ValueType, CURRENT_VALUE_RESOURCE, TELIT_INSTANCE};

use super::{fields, ip_easy::types::ContextId, write_cmd, write_cmd_fmt, NoResponse};

/// Enable LwM2M client #LWM2MENA
///
/// Starts the client on the given context. With [`AckMode::Manual`], server
/// writes and executes have to be confirmed with [`SendAck`].
#[derive(Clone, AtatCmd)]
#[at_cmd("#LWM2MENA", NoResponse, attempts = 1, timeout_ms = 10000)]
pub struct SetClientEnabled {
    #[at_arg(position = 0)]
    pub mode: ClientMode,
    #[at_arg(position = 1)]
    pub cid: ContextId,
    #[at_arg(position = 2)]
    pub ack_mode: AckMode,
}

/// Disable LwM2M client #LWM2MENA=0
#[derive(Clone)]
pub struct DisableClient;

impl AtatCmd for DisableClient {
    type Response = NoResponse;

    const MAX_LEN: usize = 15;
    const MAX_TIMEOUT_MS: u32 = 10000;
    const ATTEMPTS: u8 = 1;

    fn write(&self, buf: &mut [u8]) -> usize {
        write_cmd(buf, b"AT#LWM2MENA=0\r\n")
    }

    fn parse(&self, resp: Result<&[u8], InternalError>) -> Result<Self::Response, atat::Error> {
        resp?;
        Ok(NoResponse)
    }
}

/// Read LwM2M client state #LWM2MENA?
///
/// Only the leading `<mode>` field of `#LWM2MENA: <mode>,<cid>,...` is read.
#[derive(Clone)]
pub struct GetClientEnabled;

impl AtatCmd for GetClientEnabled {
    type Response = ClientEnableStatus;

    const MAX_LEN: usize = 15;
    const MAX_TIMEOUT_MS: u32 = 1000;

    fn write(&self, buf: &mut [u8]) -> usize {
        write_cmd(buf, b"AT#LWM2MENA?\r\n")
    }

    fn parse(&self, resp: Result<&[u8], InternalError>) -> Result<Self::Response, atat::Error> {
        let resp = resp?;
        let mut line = fields::lines(resp, b"#LWM2MENA:")
            .next()
            .ok_or(atat::Error::Parse)?;

        Ok(ClientEnableStatus {
            mode: line.read_int()?,
        })
    }
}

/// Set resource value #LWM2MSET
///
/// Writes an integer value to `/<object_id>/<instance_id>/<resource_id>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("#LWM2MSET", NoResponse, timeout_ms = 5000)]
pub struct SetResource {
    #[at_arg(position = 0)]
    pub value_type: ValueType,
    #[at_arg(position = 1)]
    pub object_id: u16,
    #[at_arg(position = 2)]
    pub instance_id: u16,
    #[at_arg(position = 3)]
    pub resource_id: u16,
    #[at_arg(position = 4)]
    pub resource_instance: u16,
    #[at_arg(position = 5)]
    pub value: i32,
}

/// Read resource #LWM2MR
///
/// Reads the current value resource (5700, instance 0) of an object
/// instance. The modem answers with an error if the instance does not exist,
/// which makes this usable as an existence probe.
#[derive(Clone)]
pub struct ReadResource {
    pub object_id: u16,
    pub instance_id: u16,
}

impl AtatCmd for ReadResource {
    type Response = ResourceValue;

    const MAX_LEN: usize = 40;
    const MAX_TIMEOUT_MS: u32 = 5000;
    const ATTEMPTS: u8 = 1;

    fn write(&self, buf: &mut [u8]) -> usize {
        write_cmd_fmt(
            buf,
            format_args!(
                "AT#LWM2MR={},{},{},{},0\r\n",
                TELIT_INSTANCE, self.object_id, self.instance_id, CURRENT_VALUE_RESOURCE
            ),
        )
    }

    fn parse(&self, resp: Result<&[u8], InternalError>) -> Result<Self::Response, atat::Error> {
        let resp = resp?;
        let mut line = fields::lines(resp, b"#LWM2MR:")
            .next()
            .unwrap_or_else(|| fields::Fields::new(resp));

        Ok(ResourceValue {
            value: line.read_string().unwrap_or_default(),
        })
    }
}

/// Create object instance #LWM2MNEWINST
#[derive(Clone, AtatCmd)]
#[at_cmd("#LWM2MNEWINST", NoResponse, attempts = 1, timeout_ms = 5000)]
pub struct CreateInstance {
    #[at_arg(position = 0)]
    pub telit_instance: u8,
    #[at_arg(position = 1)]
    pub object_id: u16,
    #[at_arg(position = 2)]
    pub instance_id: u16,
}

/// Acknowledge server action #LWM2MACK
///
/// Answers the operation announced by the last `#LWM2MRING` URC.
#[derive(Clone, AtatCmd)]
#[at_cmd("#LWM2MACK", NoResponse, attempts = 1, timeout_ms = 5000)]
pub struct SendAck {
    #[at_arg(position = 0)]
    pub action: AckAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ClientState;

    fn written<Cmd: AtatCmd>(cmd: &Cmd) -> std::string::String {
        let mut buf = [0; 64];
        let len = cmd.write(&mut buf);
        std::string::String::from_utf8_lossy(&buf[..len]).into_owned()
    }

    #[test]
    fn enable_and_disable() {
        let enable = SetClientEnabled {
            mode: ClientMode::Enabled,
            cid: ContextId(1),
            ack_mode: AckMode::Manual,
        };
        assert_eq!(written(&enable), "AT#LWM2MENA=1,1,1\r\n");
        assert_eq!(written(&DisableClient), "AT#LWM2MENA=0\r\n");
    }

    #[test]
    fn client_state_from_mode() {
        let status = GetClientEnabled
            .parse(Ok(b"#LWM2MENA: 1,1,0"))
            .unwrap();
        assert_eq!(status.state(), ClientState::Enabled);

        let status = GetClientEnabled.parse(Ok(b"#LWM2MENA: 0")).unwrap();
        assert_eq!(status.state(), ClientState::Disabled);

        assert_eq!(GetClientEnabled.parse(Ok(b"")), Err(atat::Error::Parse));
    }

    #[test]
    fn battery_level_write() {
        let cmd = SetResource {
            value_type: ValueType::Integer,
            object_id: 3,
            instance_id: 0,
            resource_id: 9,
            resource_instance: 0,
            value: 85,
        };
        assert_eq!(written(&cmd), "AT#LWM2MSET=0,3,0,9,0,85\r\n");
    }

    #[test]
    fn probe_read() {
        let cmd = ReadResource {
            object_id: 3303,
            instance_id: 2,
        };
        assert_eq!(written(&cmd), "AT#LWM2MR=0,3303,2,5700,0\r\n");

        let value = cmd.parse(Ok(b"#LWM2MR: 21.5")).unwrap();
        assert_eq!(value.value.as_str(), "21.5");

        let value = cmd.parse(Ok(b"")).unwrap();
        assert!(value.value.is_empty());
    }

    #[test]
    fn create_and_ack() {
        let create = CreateInstance {
            telit_instance: TELIT_INSTANCE,
            object_id: 3303,
            instance_id: 0,
        };
        assert_eq!(written(&create), "AT#LWM2MNEWINST=0,3303,0\r\n");

        let ack = SendAck {
            action: AckAction::Accept,
        };
        assert_eq!(written(&ack), "AT#LWM2MACK=1\r\n");
    }
}
