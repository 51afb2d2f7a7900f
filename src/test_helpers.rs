use std::{cell::Cell, collections::VecDeque, rc::Rc, string::String, vec::Vec};

use atat::AtatCmd;
use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::{asynch::channel::CommandChannel, config::OneEdgeConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(String),
    Raw(usize),
    Finish,
    Flush,
}

impl Event {
    pub fn command(cmd: &str) -> Self {
        Self::Command(cmd.into())
    }
}

/// Channel answering from a script of reply bodies, recording every
/// exchange. Commands beyond the script get an empty `OK` reply.
#[derive(Default)]
pub struct MockChannel {
    replies: VecDeque<Result<&'static [u8], atat::Error>>,
    raw_limit: Option<usize>,
    events: Vec<Event>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, reply: Result<&'static [u8], atat::Error>) -> Self {
        self.replies.push_back(reply);
        self
    }

    /// Accept at most `limit` bytes per raw write.
    pub fn raw_limit(mut self, limit: usize) -> Self {
        self.raw_limit = Some(limit);
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl CommandChannel for MockChannel {
    async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, atat::Error> {
        let mut buf = [0; 2048];
        let len = cmd.write(&mut buf);
        let written = String::from_utf8_lossy(&buf[..len]);
        self.events.push(Event::command(written.trim_end()));

        match self.replies.pop_front().unwrap_or(Ok(b"")) {
            Ok(body) => cmd.parse(Ok(body)),
            Err(e) => Err(e),
        }
    }

    async fn write_raw(&mut self, data: &[u8]) -> Result<usize, atat::Error> {
        let accepted = self.raw_limit.map_or(data.len(), |limit| data.len().min(limit));
        self.events.push(Event::Raw(accepted));
        Ok(accepted)
    }

    async fn finish_raw(&mut self) -> Result<(), atat::Error> {
        self.events.push(Event::Finish);
        Ok(())
    }

    async fn flush(&mut self) {
        self.events.push(Event::Flush);
    }
}

/// Pin keeping its level and counting falling edges.
#[derive(Debug, Default)]
pub struct MockPin {
    high: bool,
    falls: Rc<Cell<usize>>,
}

impl MockPin {
    pub fn low() -> Self {
        Self::default()
    }

    pub fn high() -> Self {
        Self {
            high: true,
            ..Self::default()
        }
    }

    pub fn falls(&self) -> Rc<Cell<usize>> {
        self.falls.clone()
    }
}

impl ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high {
            self.falls.set(self.falls.get() + 1);
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct TestConfig {
    pub power: Option<MockPin>,
    pub vint: Option<MockPin>,
}

impl OneEdgeConfig for TestConfig {
    type PowerPin = MockPin;
    type VintPin = MockPin;

    const POWER_ON_PULSE: Duration = Duration::from_millis(1);
    const BOOT_TIME: Duration = Duration::from_millis(1);

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin> {
        self.power.as_mut()
    }

    fn vint_pin(&mut self) -> Option<&mut Self::VintPin> {
        self.vint.as_mut()
    }
}
