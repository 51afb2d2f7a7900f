//! Unsolicited notifications raised by the LwM2M client
use heapless::String;

use crate::command::{
    fields::{FieldError, Fields},
    CLIENT_STATE_MAX_LEN,
};

pub type StateString = String<CLIENT_STATE_MAX_LEN>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// `LWM2M-TLT: <state>,...`: client lifecycle transition, such as
    /// registration or deregistration with the server.
    ClientStateChanged { state: StateString },
    /// `#LWM2MRING: <state>,...`: the server requests an action that waits
    /// for `#LWM2MACK`.
    PendingAction { state: StateString },
    /// `#LWM2MEND: <result>`: an LwM2M operation concluded.
    SessionEnd { result: i32 },
    /// `#LWM2MINFO: <type>,<event>`
    Info { kind: StateString, event: StateString },
}

pub fn client_state_changed(fields: &mut Fields) -> Result<Notification, FieldError> {
    let state = fields.read_string()?;
    // Remaining fields are optional, depending on firmware
    fields.skip().ok();
    fields.skip().ok();
    Ok(Notification::ClientStateChanged { state })
}

pub fn pending_action(fields: &mut Fields) -> Result<Notification, FieldError> {
    Ok(Notification::PendingAction {
        state: fields.read_string()?,
    })
}

pub fn session_end(fields: &mut Fields) -> Result<Notification, FieldError> {
    Ok(Notification::SessionEnd {
        result: fields.read_int()?,
    })
}

pub fn info(fields: &mut Fields) -> Result<Notification, FieldError> {
    let kind = fields.read_string()?;
    let event = fields.read_string()?;
    Ok(Notification::Info { kind, event })
}
