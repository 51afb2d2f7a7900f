//! Exclusive access to the [`CommandChannel`]
//!
//! Every exchange with the module happens while holding the channel mutex.
//! [`AtHandle::discard`] and [`AtHandle::query`] release it before their
//! result is returned. Multi step exchanges hold a [`Transaction`], which
//! releases the channel when dropped.
use atat::AtatCmd;
use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    mutex::{Mutex, MutexGuard},
};

use super::channel::CommandChannel;
use crate::error::Error;

pub struct AtHandle<'d, M: RawMutex, C: CommandChannel>(&'d Mutex<M, C>);

impl<M: RawMutex, C: CommandChannel> Clone for AtHandle<'_, M, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, C: CommandChannel> Copy for AtHandle<'_, M, C> {}

impl<'d, M: RawMutex, C: CommandChannel> AtHandle<'d, M, C> {
    pub(crate) fn new(channel: &'d Mutex<M, C>) -> Self {
        Self(channel)
    }

    /// Take the channel, waiting for the current holder to release it.
    pub async fn lock(&self) -> Transaction<'d, M, C> {
        Transaction {
            channel: self.0.lock().await,
        }
    }

    /// Issue `cmd`, ignoring any reply body.
    pub async fn discard<Cmd: AtatCmd>(&self, cmd: &Cmd) -> Result<(), Error> {
        self.query(cmd).await.map(drop)
    }

    /// Issue `cmd` and return its parsed reply.
    pub async fn query<Cmd: AtatCmd>(&self, cmd: &Cmd) -> Result<Cmd::Response, Error> {
        let result = {
            let mut tx = self.lock().await;
            tx.send(cmd).await
        };
        Ok(result?)
    }
}

/// Exclusive use of the channel, held until dropped.
pub struct Transaction<'d, M: RawMutex, C: CommandChannel> {
    channel: MutexGuard<'d, M, C>,
}

impl<M: RawMutex, C: CommandChannel> Transaction<'_, M, C> {
    pub async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, atat::Error> {
        self.channel.send(cmd).await
    }

    pub async fn write_raw(&mut self, data: &[u8]) -> Result<usize, atat::Error> {
        self.channel.write_raw(data).await
    }

    pub async fn finish_raw(&mut self) -> Result<(), atat::Error> {
        self.channel.finish_raw().await
    }

    /// Drop residue of a failed command so it does not leak into the next
    /// one.
    pub async fn clear(&mut self) {
        self.channel.flush().await
    }
}
