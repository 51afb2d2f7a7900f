use atat::{asynch::AtatClient, AtatCmd};

use crate::command::file_system::{ObjectData, OBJECT_DATA_MAX_LEN};

/// The single AT link to the module.
///
/// Implementations do not serialize access themselves; callers reach the
/// channel through the mutex held by [`super::State`].
pub trait CommandChannel {
    /// Write `cmd` and parse its reply. No retries.
    async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, atat::Error>;

    /// Transfer raw bytes after an upload prompt. Returns how many bytes were
    /// accepted.
    async fn write_raw(&mut self, data: &[u8]) -> Result<usize, atat::Error>;

    /// Wait for the final result code closing a raw transfer.
    async fn finish_raw(&mut self) -> Result<(), atat::Error>;

    /// Drop unread reply residue left by a failed command.
    async fn flush(&mut self);
}

/// [`CommandChannel`] over an atat async client.
pub struct AtatChannel<AT: AtatClient> {
    client: AT,
}

impl<AT: AtatClient> AtatChannel<AT> {
    pub fn new(client: AT) -> Self {
        Self { client }
    }

    pub fn into_inner(self) -> AT {
        self.client
    }
}

impl<AT: AtatClient> CommandChannel for AtatChannel<AT> {
    async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, atat::Error> {
        self.client.send(cmd).await
    }

    async fn write_raw(&mut self, data: &[u8]) -> Result<usize, atat::Error> {
        if data.len() > OBJECT_DATA_MAX_LEN {
            warn!(
                "Payload of {} bytes exceeds the {} byte egress buffer",
                data.len(),
                OBJECT_DATA_MAX_LEN
            );
            return Ok(0);
        }

        // The client waits for the result code following the payload
        let payload = ObjectData::new(data);
        self.client.send(&payload).await?;
        Ok(payload.written())
    }

    async fn finish_raw(&mut self) -> Result<(), atat::Error> {
        Ok(())
    }

    async fn flush(&mut self) {
        // The atat ingress discards residue on its own
    }
}
