use atat::UrcSubscription;
use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Sender};

use super::{channel::CommandChannel, transaction::AtHandle, NOTIFICATION_CAPACITY};
use crate::command::{
    fields::{FieldError, Fields},
    lwm2m::urc::{self, Notification},
    urc::{CLIENT_STATE_PREFIX, INFO_PREFIX, RING_PREFIX, SESSION_END_PREFIX},
    Urc,
};

type Decoder = fn(&mut Fields) -> Result<Notification, FieldError>;

static HANDLERS: [(&[u8], Decoder); 4] = [
    (CLIENT_STATE_PREFIX, urc::client_state_changed),
    (RING_PREFIX, urc::pending_action),
    (SESSION_END_PREFIX, urc::session_end),
    (INFO_PREFIX, urc::info),
];

/// Decodes LwM2M URCs and queues them for [`super::control::Control`].
pub struct UrcHandler<'d, M: RawMutex, C: CommandChannel> {
    at: AtHandle<'d, M, C>,
    notifications: Sender<'d, M, Notification, NOTIFICATION_CAPACITY>,
}

impl<'d, M: RawMutex, C: CommandChannel> UrcHandler<'d, M, C> {
    pub(crate) fn new(
        at: AtHandle<'d, M, C>,
        notifications: Sender<'d, M, Notification, NOTIFICATION_CAPACITY>,
    ) -> Self {
        Self { at, notifications }
    }

    pub async fn run<const CAPACITY: usize, const SUBSCRIBERS: usize>(
        &mut self,
        mut subscription: UrcSubscription<'_, Urc, CAPACITY, SUBSCRIBERS>,
    ) -> ! {
        loop {
            let urc = subscription.next_message_pure().await;
            self.dispatch(urc.as_bytes()).await;
        }
    }

    /// Decode one URC line. Lines with an unknown prefix are ignored, lines
    /// that fail to decode are logged and dropped.
    pub async fn dispatch(&mut self, line: &[u8]) {
        let Some((prefix, decode)) = HANDLERS
            .iter()
            .find(|(prefix, _)| Fields::with_prefix(line, prefix).is_some())
        else {
            return;
        };

        let decoded = {
            let _tx = self.at.lock().await;
            Fields::with_prefix(line, prefix)
                .ok_or(FieldError::Missing)
                .and_then(|mut fields| decode(&mut fields))
        };

        match decoded {
            Ok(notification) => {
                debug!("LwM2M URC: {:?}", notification);
                if self.notifications.try_send(notification).is_err() {
                    warn!("Notification queue full, dropping event");
                }
            }
            Err(e) => warn!("Malformed LwM2M URC: {:?}", e),
        }
    }
}
