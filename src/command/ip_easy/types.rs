//! Argument and parameter types used by IPEasy context Commands and Responses
use atat::atat_derive::{AtatEnum, AtatLen};
use serde::{Deserialize, Serialize};

/// Number of PDP context slots the ME310 exposes to IPEasy.
pub const CONTEXT_MAX: usize = 6;

/// `<stat>` value reported by `#SGACT?` for an active context.
pub const ACTIVATED_CONTEXT: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AtatLen)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ContextId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContextStatus {
    Deactivated = 0,
    Activated = 1,
}

impl From<i32> for ContextStatus {
    fn from(stat: i32) -> Self {
        if stat == ACTIVATED_CONTEXT {
            Self::Activated
        } else {
            Self::Deactivated
        }
    }
}
