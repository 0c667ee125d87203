//! Store events and change notification.
//!
//! Stores emit typed events; the composition root wraps them in envelopes and
//! fans them out to presentation-layer subscribers over an [`EventBus`].

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
