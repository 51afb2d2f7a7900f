pub mod channel;
mod context;
pub mod control;
pub mod objects;
pub mod runner;
pub mod transaction;
pub mod urc_handler;

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel, mutex::Mutex};

use crate::{command::lwm2m::urc::Notification, config::OneEdgeConfig};
use channel::CommandChannel;
use control::Control;
use runner::Runner;
use transaction::AtHandle;
use urc_handler::UrcHandler;

/// Notifications queued for the application before new ones are dropped.
pub const NOTIFICATION_CAPACITY: usize = 4;

pub struct State<M: RawMutex, C: CommandChannel> {
    channel: Mutex<M, C>,
    notifications: Channel<M, Notification, NOTIFICATION_CAPACITY>,
}

impl<M: RawMutex, C: CommandChannel> State<M, C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel: Mutex::new(channel),
            notifications: Channel::new(),
        }
    }
}

pub fn new<'d, M: RawMutex, C: CommandChannel, Cfg: OneEdgeConfig>(
    state: &'d State<M, C>,
    config: Cfg,
) -> (
    Control<'d, M, C>,
    Runner<'d, M, C, Cfg>,
    UrcHandler<'d, M, C>,
) {
    let at = AtHandle::new(&state.channel);

    let control = Control::new(at, state.notifications.receiver());
    let runner = Runner::new(at, config);
    let urc_handler = UrcHandler::new(at, state.notifications.sender());

    (control, runner, urc_handler)
}

#[cfg(test)]
impl<M: RawMutex, C: CommandChannel> State<M, C> {
    pub(crate) fn channel(&self) -> &Mutex<M, C> {
        &self.channel
    }
}
