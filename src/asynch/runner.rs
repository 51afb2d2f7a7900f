use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;
use embedded_hal::digital::{InputPin, OutputPin};

use super::{channel::CommandChannel, transaction::AtHandle};
use crate::{command::AT, config::OneEdgeConfig, error::Error};

/// Brings the module up and activates the configured context.
pub struct Runner<'d, M: RawMutex, C: CommandChannel, Cfg: OneEdgeConfig> {
    at: AtHandle<'d, M, C>,
    config: Cfg,
}

impl<'d, M: RawMutex, C: CommandChannel, Cfg: OneEdgeConfig> Runner<'d, M, C, Cfg> {
    pub(crate) fn new(at: AtHandle<'d, M, C>, config: Cfg) -> Self {
        Self { at, config }
    }

    /// Make sure the module answers, powering it up if needed, then make
    /// sure [`OneEdgeConfig::CONTEXT_ID`] is activated.
    pub async fn init(&mut self) -> Result<(), Error> {
        if !self.is_alive().await.unwrap_or(false) {
            self.power_up().await?;
            if !self.is_alive().await.unwrap_or(false) {
                error!("Module does not respond");
                return Err(Error::PoweredDown);
            }
        }

        self.at.ensure_context_activated(Cfg::CONTEXT_ID).await
    }

    pub async fn is_alive(&mut self) -> Result<bool, Error> {
        if !self.has_power().await? {
            return Err(Error::PoweredDown);
        }

        self.at.discard(&AT).await?;
        Ok(true)
    }

    pub async fn has_power(&mut self) -> Result<bool, Error> {
        if let Some(pin) = self.config.vint_pin() {
            pin.is_high().map_err(|_| Error::IoPin)
        } else {
            info!("No VInt pin configured");
            Ok(true)
        }
    }

    /// Pulse the power line and wait for the module to boot. Skipped when
    /// VInt reports the module already powered, as the pulse would switch it
    /// off.
    pub async fn power_up(&mut self) -> Result<(), Error> {
        if self.config.vint_pin().is_some() && self.has_power().await? {
            return Ok(());
        }

        if let Some(pin) = self.config.power_pin() {
            pin.set_low().map_err(|_| Error::IoPin)?;
            Timer::after(Cfg::POWER_ON_PULSE).await;
            pin.set_high().map_err(|_| Error::IoPin)?;
            Timer::after(Cfg::BOOT_TIME).await;
            debug!("Powered up");
        } else {
            warn!("No power pin configured");
        }
        Ok(())
    }
}
