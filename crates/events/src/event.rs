use chrono::{DateTime, Utc};

/// A store event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - named with a stable dotted type (e.g. "cart.line.added")
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier.
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the action that produced the event was dispatched.
    fn occurred_at(&self) -> DateTime<Utc>;
}
