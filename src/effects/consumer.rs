//! Event consumers: outside code reacting to committed events.

use crate::core::{EventKind, GameEvent, Snapshot};

/// Observes every committed step and may append events of its own.
///
/// Consumers see the snapshot after the step was committed, plus the
/// step's events. They cannot mutate state except by returning new
/// events, which the executor appends after the step. Events returned by
/// consumers are not fed back to consumers.
pub trait EventConsumer {
    fn on_events(&self, snapshot: &Snapshot, events: &[GameEvent]) -> Vec<EventKind>;
}

impl<F> EventConsumer for F
where
    F: Fn(&Snapshot, &[GameEvent]) -> Vec<EventKind>,
{
    fn on_events(&self, snapshot: &Snapshot, events: &[GameEvent]) -> Vec<EventKind> {
        self(snapshot, events)
    }
}
