//! In-memory event bus.

use std::sync::{Mutex, MutexGuard, mpsc};

use crate::bus::{EventBus, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// A thread panicked while holding the subscriber list.
    Poisoned,
}

/// Fan-out bus over mpsc channels. Synchronous, no IO.
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    senders: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscriptions still attached after the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.senders().map_or(0, |senders| senders.len())
    }

    fn senders(&self) -> Result<MutexGuard<'_, Vec<mpsc::Sender<M>>>, InMemoryBusError> {
        self.senders.lock().map_err(|_| InMemoryBusError::Poisoned)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut senders = self.senders()?;
        let attached = senders.len();
        senders.retain(|tx| tx.send(message.clone()).is_ok());

        let closed = attached - senders.len();
        if closed > 0 {
            tracing::trace!(closed, "pruned closed subscriptions");
        }
        Ok(())
    }

    /// On a poisoned bus the returned subscription is already disconnected.
    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();
        match self.senders() {
            Ok(mut senders) => senders.push(tx),
            Err(e) => tracing::warn!(error = ?e, "subscribing to a poisoned bus"),
        }
        Subscription::new(rx)
    }
}
