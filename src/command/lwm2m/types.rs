//! Argument and parameter types used by LwM2M client Commands and Responses
use atat::atat_derive::AtatEnum;

/// `<mode>` reported by `#LWM2MENA?` while the client is running.
pub const CLIENT_ENABLED: i32 = 1;

/// Client slot used for every object operation. The ME310 runs a single
/// LwM2M client instance.
pub const TELIT_INSTANCE: u8 = 0;

/// IPSO "Sensor Value" resource, present on every sensor object instance.
pub const CURRENT_VALUE_RESOURCE: u16 = 5700;

/// LwM2M Device object and its Battery Level resource.
pub const DEVICE_OBJECT: u16 = 3;
pub const BATTERY_LEVEL_RESOURCE: u16 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientMode {
    Disabled = 0,
    Enabled = 1,
}

/// How the client confirms actions pushed by the LwM2M server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckMode {
    /// The client applies server writes and executes on its own.
    Automatic = 0,
    /// Server writes and executes raise `#LWM2MRING` and wait for
    /// `#LWM2MACK` from the host.
    Manual = 1,
}

/// Host answer to a pending server action announced by `#LWM2MRING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckAction {
    Reject = 0,
    Accept = 1,
}

/// `<type>` of the value written by `#LWM2MSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueType {
    Integer = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientState {
    Enabled,
    Disabled,
}
