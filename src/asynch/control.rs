use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Receiver};

use super::{channel::CommandChannel, transaction::AtHandle, NOTIFICATION_CAPACITY};
use crate::{
    command::{
        ip_easy::types::ContextId,
        lwm2m::{
            types::{
                AckAction, AckMode, ClientMode, ClientState, ValueType, BATTERY_LEVEL_RESOURCE,
                DEVICE_OBJECT,
            },
            urc::Notification,
            DisableClient, GetClientEnabled, SendAck, SetClientEnabled, SetResource,
        },
    },
    error::Error,
};

pub struct Control<'d, M: RawMutex, C: CommandChannel> {
    pub(crate) at: AtHandle<'d, M, C>,
    notifications: Receiver<'d, M, Notification, NOTIFICATION_CAPACITY>,
}

impl<'d, M: RawMutex, C: CommandChannel> Control<'d, M, C> {
    pub(crate) fn new(
        at: AtHandle<'d, M, C>,
        notifications: Receiver<'d, M, Notification, NOTIFICATION_CAPACITY>,
    ) -> Self {
        Self { at, notifications }
    }

    /// Whether `cid` is listed as activated by `#SGACT?`. A context missing
    /// from the listing, or a failed query, reads as not activated.
    pub async fn is_context_activated(&self, cid: ContextId) -> bool {
        self.at.is_context_activated(cid).await
    }

    /// Activate `cid` without checking its current state first.
    pub async fn activate_context(&self, cid: ContextId) -> Result<(), Error> {
        self.at.activate_context(cid).await
    }

    pub async fn ensure_context_activated(&self, cid: ContextId) -> Result<(), Error> {
        self.at.ensure_context_activated(cid).await
    }

    pub async fn enable_client(&self, cid: ContextId, ack_mode: AckMode) -> Result<(), Error> {
        self.at
            .discard(&SetClientEnabled {
                mode: ClientMode::Enabled,
                cid,
                ack_mode,
            })
            .await
    }

    pub async fn disable_client(&self) -> Result<(), Error> {
        self.at.discard(&DisableClient).await
    }

    /// Client state as reported by the module, keeping query failures apart
    /// from a disabled client.
    pub async fn client_state(&self) -> Result<ClientState, Error> {
        Ok(self.at.query(&GetClientEnabled).await?.state())
    }

    /// Whether the client is running. A failed query reads as disabled, use
    /// [`Control::client_state`] to tell the two apart.
    pub async fn is_client_enabled(&self) -> bool {
        match self.client_state().await {
            Ok(state) => state == ClientState::Enabled,
            Err(e) => {
                warn!("Failed to read client state: {:?}", e);
                false
            }
        }
    }

    /// Report the battery level, in percent, on the Device object.
    pub async fn set_battery_level(&self, level: u8) -> Result<(), Error> {
        self.at
            .discard(&SetResource {
                value_type: ValueType::Integer,
                object_id: DEVICE_OBJECT,
                instance_id: 0,
                resource_id: BATTERY_LEVEL_RESOURCE,
                resource_instance: 0,
                value: i32::from(level),
            })
            .await
    }

    /// Accept or reject the action announced by the last
    /// [`Notification::PendingAction`].
    pub async fn send_ack(&self, action: AckAction) -> Result<(), Error> {
        self.at.discard(&SendAck { action }).await
    }

    pub async fn next_notification(&self) -> Notification {
        self.notifications.receive().await
    }

    pub fn try_notification(&self) -> Option<Notification> {
        self.notifications.try_receive().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asynch::{new, State};
    use crate::test_helpers::{Event, MockChannel, TestConfig};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn commands(state: &State<NoopRawMutex, MockChannel>) -> std::vec::Vec<Event> {
        state.channel().try_lock().unwrap().events().to_vec()
    }

    #[test]
    fn absent_context_is_not_activated() {
        let state = State::<NoopRawMutex, _>::new(
            MockChannel::new().reply(Ok(b"#SGACT: 1,1\r\n#SGACT: 2,1")),
        );
        let (control, _, _) = new(&state, TestConfig::default());

        assert!(!block_on(control.is_context_activated(ContextId(4))));
        assert!(state.channel().try_lock().is_ok());
    }

    #[test]
    fn first_listed_context_decides() {
        let state = State::<NoopRawMutex, _>::new(
            MockChannel::new()
                .reply(Ok(b"#SGACT: 3,1\r\n#SGACT: 3,0"))
                .reply(Ok(b"#SGACT: 3,0\r\n#SGACT: 3,1")),
        );
        let (control, _, _) = new(&state, TestConfig::default());

        assert!(block_on(control.is_context_activated(ContextId(3))));
        assert!(!block_on(control.is_context_activated(ContextId(3))));
    }

    #[test]
    fn malformed_later_slot_does_not_hide_match() {
        let state = State::<NoopRawMutex, _>::new(
            MockChannel::new().reply(Ok(b"#SGACT: 1,1\r\n#SGACT: 2\r\n")),
        );
        let (control, _, _) = new(&state, TestConfig::default());

        assert!(block_on(control.is_context_activated(ContextId(1))));
    }

    #[test]
    fn failed_listing_is_not_activated() {
        let state =
            State::<NoopRawMutex, _>::new(MockChannel::new().reply(Err(atat::Error::Timeout)));
        let (control, _, _) = new(&state, TestConfig::default());

        assert!(!block_on(control.is_context_activated(ContextId(1))));
    }

    #[test]
    fn ensure_context_activates_once() {
        let state = State::<NoopRawMutex, _>::new(
            MockChannel::new()
                .reply(Ok(b"#SGACT: 1,0"))
                .reply(Ok(b""))
                .reply(Ok(b"#SGACT: 1,1")),
        );
        let (control, _, _) = new(&state, TestConfig::default());

        block_on(control.ensure_context_activated(ContextId(1))).unwrap();
        block_on(control.ensure_context_activated(ContextId(1))).unwrap();

        assert_eq!(
            commands(&state),
            [
                Event::command("AT#SGACT?"),
                Event::command("AT#SGACT=1,1"),
                Event::command("AT#SGACT?"),
            ]
        );
    }

    #[test]
    fn client_enable_disable() {
        let state = State::<NoopRawMutex, _>::new(MockChannel::new());
        let (control, _, _) = new(&state, TestConfig::default());

        block_on(control.enable_client(ContextId(1), AckMode::Manual)).unwrap();
        block_on(control.disable_client()).unwrap();

        assert_eq!(
            commands(&state),
            [
                Event::command("AT#LWM2MENA=1,1,1"),
                Event::command("AT#LWM2MENA=0"),
            ]
        );
    }

    #[test]
    fn client_query_failure_reads_disabled() {
        let state = State::<NoopRawMutex, _>::new(
            MockChannel::new()
                .reply(Err(atat::Error::Error))
                .reply(Err(atat::Error::Error))
                .reply(Ok(b"#LWM2MENA: 1,1,0")),
        );
        let (control, _, _) = new(&state, TestConfig::default());

        assert!(!block_on(control.is_client_enabled()));
        assert_eq!(
            block_on(control.client_state()),
            Err(Error::Atat(atat::Error::Error))
        );
        assert!(block_on(control.is_client_enabled()));
        assert!(state.channel().try_lock().is_ok());
    }

    #[test]
    fn battery_level_and_ack() {
        let state = State::<NoopRawMutex, _>::new(MockChannel::new());
        let (control, _, _) = new(&state, TestConfig::default());

        block_on(control.set_battery_level(85)).unwrap();
        block_on(control.send_ack(AckAction::Reject)).unwrap();

        assert_eq!(
            commands(&state),
            [
                Event::command("AT#LWM2MSET=0,3,0,9,0,85"),
                Event::command("AT#LWM2MACK=0"),
            ]
        );
    }

    #[test]
    fn mutation_error_is_returned() {
        let state =
            State::<NoopRawMutex, _>::new(MockChannel::new().reply(Err(atat::Error::Error)));
        let (control, _, _) = new(&state, TestConfig::default());

        assert_eq!(
            block_on(control.activate_context(ContextId(2))),
            Err(Error::Atat(atat::Error::Error))
        );
        assert!(state.channel().try_lock().is_ok());
    }
}
