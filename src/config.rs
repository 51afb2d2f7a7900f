use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::{
    command::ip_easy::types::ContextId,
    module_timing::{boot_time, pwr_on_time},
};

pub struct NoPin;

impl ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub trait OneEdgeConfig {
    type PowerPin: OutputPin;
    type VintPin: InputPin;

    /// IPEasy context that `Runner::init` makes sure is activated, and the
    /// context the LwM2M client is bound to.
    const CONTEXT_ID: ContextId = ContextId(1);

    /// Low time of the power pin pulse switching the module on.
    const POWER_ON_PULSE: Duration = pwr_on_time();
    const BOOT_TIME: Duration = boot_time();

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin>;
    fn vint_pin(&mut self) -> Option<&mut Self::VintPin>;
}
