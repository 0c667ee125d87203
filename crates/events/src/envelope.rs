use serde::{Deserialize, Serialize};

use frostcart_core::EventId;

/// Envelope for a store event, carrying delivery metadata.
///
/// `sequence_number` is assigned by the publisher and increases strictly
/// across every store it owns, so subscribers can order notifications from
/// different stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,
    store: String,
    sequence_number: u64,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: EventId, store: impl Into<String>, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            store: store.into(),
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Name of the store that emitted the event.
    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
