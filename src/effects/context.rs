//! What an effect function sees, and what it hands back.

use serde::{Deserialize, Serialize};

use super::continuation::EffectContinuation;
use super::run::EffectRun;
use crate::cards::{Card, CardDatabase, CardId, Icon};
use crate::choice::ChoiceRequest;
use crate::core::{EngineConfig, EngineError, EventSink, GameEvent, PlayerId, Snapshot};
use crate::icons::{self, PlayerSet};
use crate::ops::Ops;

/// Demand effects target opponents; non-demand effects benefit the
/// executing player (and sharers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Demand,
    NonDemand,
}

/// Read-only view handed to an effect function on every invocation.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    snapshot: &'a Snapshot,
    ops: Ops<'a>,
    card: CardId,
    index: usize,
    kind: EffectKind,
    player: PlayerId,
    activator: PlayerId,
}

impl<'a> EffectContext<'a> {
    pub(crate) fn new(
        snapshot: &'a Snapshot,
        ops: Ops<'a>,
        run: &EffectRun,
        kind: EffectKind,
    ) -> Self {
        Self {
            snapshot,
            ops,
            card: run.card,
            index: run.index,
            kind,
            player: run.player,
            activator: run.activator,
        }
    }

    /// The state this step starts from.
    #[must_use]
    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    #[must_use]
    pub fn ops(&self) -> Ops<'a> {
        self.ops
    }

    #[must_use]
    pub fn db(&self) -> &'a CardDatabase {
        self.ops.db()
    }

    #[must_use]
    pub fn config(&self) -> &'a EngineConfig {
        self.ops.config()
    }

    /// Card whose effect is running.
    #[must_use]
    pub fn card(&self) -> CardId {
        self.card
    }

    /// Data of the running card.
    pub fn card_data(&self) -> Result<&'a Card, EngineError> {
        self.db().get(self.card)
    }

    /// Index of the effect on its card.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Player executing this run: the activator, or a sharer.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Player who activated the card.
    #[must_use]
    pub fn activator(&self) -> PlayerId {
        self.activator
    }

    /// Whether this run is a sharer's, not the activator's.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.player != self.activator
    }

    /// Sink numbered from this step's snapshot.
    #[must_use]
    pub fn event_sink(&self) -> EventSink {
        self.snapshot.event_sink()
    }

    /// Opponents with strictly fewer `icon` than the activator, in turn
    /// order, counted on the step's snapshot.
    pub fn demand_targets(&self, icon: Icon) -> Result<PlayerSet, EngineError> {
        icons::demand_targets(self.snapshot, self.db(), self.activator, icon)
    }

    /// Visible `icon` count for a player on the step's snapshot.
    pub fn count_icons(&self, player: PlayerId, icon: Icon) -> Result<u32, EngineError> {
        icons::count_icons(self.snapshot, self.db(), player, icon)
    }
}

/// Outcome of one effect invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectResult {
    /// Done; the continuation is dropped.
    Complete { snapshot: Snapshot, events: Vec<GameEvent> },
    /// Suspend on `request`, resuming at `next` with the answer.
    NeedChoice {
        snapshot: Snapshot,
        events: Vec<GameEvent>,
        request: ChoiceRequest,
        next: EffectContinuation,
    },
    /// Re-invoke at `next` straight away, with no answer.
    Continue {
        snapshot: Snapshot,
        events: Vec<GameEvent>,
        next: EffectContinuation,
    },
}

impl EffectResult {
    #[must_use]
    pub fn complete(snapshot: Snapshot, events: EventSink) -> Self {
        EffectResult::Complete {
            snapshot,
            events: events.into_events(),
        }
    }

    #[must_use]
    pub fn need_choice(
        snapshot: Snapshot,
        events: EventSink,
        request: ChoiceRequest,
        next: EffectContinuation,
    ) -> Self {
        EffectResult::NeedChoice {
            snapshot,
            events: events.into_events(),
            request,
            next,
        }
    }

    #[must_use]
    pub fn continue_at(snapshot: Snapshot, events: EventSink, next: EffectContinuation) -> Self {
        EffectResult::Continue {
            snapshot,
            events: events.into_events(),
            next,
        }
    }

    /// The snapshot the effect produced.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            EffectResult::Complete { snapshot, .. }
            | EffectResult::NeedChoice { snapshot, .. }
            | EffectResult::Continue { snapshot, .. } => snapshot,
        }
    }
}
