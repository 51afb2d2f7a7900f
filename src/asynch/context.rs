//! IPEasy context activation, shared by [`super::control::Control`] and
//! [`super::runner::Runner`].
use embassy_sync::blocking_mutex::raw::RawMutex;

use super::{channel::CommandChannel, transaction::AtHandle};
use crate::{
    command::ip_easy::{
        types::{ContextId, ContextStatus},
        GetContextActivation, SetContextActivation,
    },
    error::Error,
};

impl<M: RawMutex, C: CommandChannel> AtHandle<'_, M, C> {
    pub(crate) async fn is_context_activated(&self, cid: ContextId) -> bool {
        match self.query(&GetContextActivation).await {
            Ok(contexts) => contexts.status(cid) == Some(ContextStatus::Activated),
            Err(e) => {
                warn!("Failed to read context activation: {:?}", e);
                false
            }
        }
    }

    pub(crate) async fn activate_context(&self, cid: ContextId) -> Result<(), Error> {
        self.discard(&SetContextActivation {
            cid,
            status: ContextStatus::Activated,
        })
        .await
    }

    pub(crate) async fn ensure_context_activated(&self, cid: ContextId) -> Result<(), Error> {
        if self.is_context_activated(cid).await {
            debug!("Context {} already active", cid.0);
            return Ok(());
        }

        info!("Activating context {}", cid.0);
        self.activate_context(cid).await
    }
}
