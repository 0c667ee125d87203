//! Change-notification publish/subscribe abstraction.
//!
//! Delivery is best-effort fan-out: every live subscription receives a copy
//! of every message published after it subscribed, in publish order.
//! Subscribers that have been dropped are pruned on the next publish.

use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a bus.
///
/// Designed for single-threaded consumption; the presentation layer usually
/// drains it with [`Subscription::drain`] after each dispatch.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Take every message currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Publish/subscribe bus.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug;

    /// Publish a message to all current subscribers.
    fn publish(&self, message: M) -> Result<(), Self::Error>;

    /// Create a new subscription.
    fn subscribe(&self) -> Subscription<M>;
}
