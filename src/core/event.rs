//! Game events: the append-only audit log.
//!
//! Primitives never write the log directly. They push `EventKind`s into an
//! `EventSink`, which numbers them starting from the snapshot's next event
//! id. The executor then commits the sink onto the snapshot in one step, so
//! ids stay strictly increasing and are never reused.
//!
//! ## Timestamps
//!
//! `timestamp` is the snapshot's logical clock, not wall-clock time:
//! identical inputs must produce byte-identical logs on replay.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{Age, CardId, Color};
use crate::choice::ChoiceId;
use crate::zones::{SplayDirection, Zone};

/// Unique, strictly increasing event identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// What happened, with its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Drew {
        player: PlayerId,
        card: CardId,
        requested_age: Age,
        actual_age: Age,
    },
    Melded {
        player: PlayerId,
        card: CardId,
        color: Color,
    },
    Scored {
        player: PlayerId,
        card: CardId,
    },
    Tucked {
        player: PlayerId,
        card: CardId,
        color: Color,
    },
    Splayed {
        player: PlayerId,
        color: Color,
        direction: SplayDirection,
    },
    Transferred {
        from: PlayerId,
        to: PlayerId,
        card: CardId,
        from_zone: Zone,
        to_zone: Zone,
    },
    Returned {
        player: PlayerId,
        card: CardId,
        age: Age,
    },
    CardRevealed {
        player: PlayerId,
        card: CardId,
    },
    /// A non-demand effect is about to run for a sharing opponent.
    SharedEffect {
        player: PlayerId,
        activator: PlayerId,
        card: CardId,
    },
    ChoiceRequested {
        choice: ChoiceId,
        player: PlayerId,
    },
    ChoiceAnswered {
        choice: ChoiceId,
        player: PlayerId,
        /// The answer was replaced by the decline response.
        declined: bool,
    },
    ChoiceTimedOut {
        choice: ChoiceId,
        player: PlayerId,
    },
    EffectCompleted {
        card: CardId,
        index: usize,
        player: PlayerId,
    },
    /// A draw above the highest age ended the game.
    GameEnded {
        trigger: PlayerId,
        requested_age: Age,
        winners: Vec<PlayerId>,
    },
    /// Raised by external consumers (e.g. `achievement_claimed`).
    Custom {
        tag: String,
        player: Option<PlayerId>,
        card: Option<CardId>,
    },
}

impl EventKind {
    /// Short type tag, stable across versions.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            EventKind::Drew { .. } => "drew",
            EventKind::Melded { .. } => "melded",
            EventKind::Scored { .. } => "scored",
            EventKind::Tucked { .. } => "tucked",
            EventKind::Splayed { .. } => "splayed",
            EventKind::Transferred { .. } => "transferred",
            EventKind::Returned { .. } => "returned",
            EventKind::CardRevealed { .. } => "card_revealed",
            EventKind::SharedEffect { .. } => "shared_effect",
            EventKind::ChoiceRequested { .. } => "choice_requested",
            EventKind::ChoiceAnswered { .. } => "choice_answered",
            EventKind::ChoiceTimedOut { .. } => "choice_timed_out",
            EventKind::EffectCompleted { .. } => "effect_completed",
            EventKind::GameEnded { .. } => "game_ended",
            EventKind::Custom { tag, .. } => tag,
        }
    }
}

/// A logged event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub timestamp: u64,
    pub kind: EventKind,
}

/// Collects events emitted during one logical effect step.
///
/// ```
/// use dogma_engine::cards::CardId;
/// use dogma_engine::core::{EventKind, EventSink, PlayerId};
///
/// let mut sink = EventSink::starting_at(10, 0);
/// sink.emit(EventKind::CardRevealed { player: PlayerId::new(0), card: CardId::new(1) });
/// sink.emit(EventKind::CardRevealed { player: PlayerId::new(0), card: CardId::new(2) });
///
/// let ids: Vec<_> = sink.events().iter().map(|e| e.id.0).collect();
/// assert_eq!(ids, vec![10, 11]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventSink {
    first_id: u64,
    timestamp: u64,
    events: Vec<GameEvent>,
}

impl EventSink {
    /// Create a sink whose first event gets id `first_id`.
    #[must_use]
    pub fn starting_at(first_id: u64, timestamp: u64) -> Self {
        Self {
            first_id,
            timestamp,
            events: Vec::new(),
        }
    }

    /// Id the next emitted event will receive.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.first_id + self.events.len() as u64
    }

    /// Id of the first event in this sink.
    #[must_use]
    pub fn first_id(&self) -> u64 {
        self.first_id
    }

    /// Append an event.
    pub fn emit(&mut self, kind: EventKind) {
        let id = EventId(self.next_id());
        self.events.push(GameEvent {
            id,
            timestamp: self.timestamp,
            kind,
        });
    }

    /// Events emitted so far.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Check if nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the sink.
    #[must_use]
    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }
}
