//! Responses for LwM2M client Commands
use atat::AtatResp;
use heapless::String;

use super::types::{ClientState, CLIENT_ENABLED};

/// 2.x Read client enable state #LWM2MENA?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientEnableStatus {
    pub mode: i32,
}

impl AtatResp for ClientEnableStatus {}

impl ClientEnableStatus {
    pub fn state(&self) -> ClientState {
        if self.mode == CLIENT_ENABLED {
            ClientState::Enabled
        } else {
            ClientState::Disabled
        }
    }
}

/// 2.x Read resource #LWM2MR
///
/// The first field of the reply, as text. Empty when the modem answered with
/// a bare `OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceValue {
    pub value: String<64>,
}

impl AtatResp for ResourceValue {}
