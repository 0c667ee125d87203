//! Reducer-style state container trait shared by every storefront store.

use core::convert::Infallible;

/// A single-writer state container mutated by discrete, named actions.
///
/// - **Decision logic**: `handle(&self, action)` returns the events the action
///   produces. An action that changes nothing returns no events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// Stores must not perform IO. Derived values (filtered lists, totals) are
/// computed by readers on demand, never cached in the state.
pub trait Store {
    type Action: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Stable store name used for logging and event envelopes.
    const NAME: &'static str;

    /// Number of events applied so far.
    fn version(&self) -> u64;

    /// Evolve in-memory state from a single event.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and an action.
    ///
    /// This must not mutate state.
    fn handle(&self, action: &Self::Action) -> Result<Vec<Self::Event>, Self::Error>;

    /// Handle `action` and apply every resulting event in order.
    fn dispatch(&mut self, action: &Self::Action) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle(action)?;
        for event in &events {
            self.apply(event);
        }
        tracing::debug!(
            store = Self::NAME,
            events = events.len(),
            version = self.version(),
            "action dispatched"
        );
        Ok(events)
    }
}

/// Dispatch on a store whose decisions cannot fail.
pub fn dispatch_total<S>(store: &mut S, action: &S::Action) -> Vec<S::Event>
where
    S: Store<Error = Infallible>,
{
    match store.dispatch(action) {
        Ok(events) => events,
        Err(never) => match never {},
    }
}
