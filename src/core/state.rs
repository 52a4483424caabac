//! Game snapshot: the entire game state at one point in time.
//!
//! ## Snapshot
//!
//! - Per-player boards (hand, score pile, color stacks)
//! - Shared supply piles
//! - Append-only event log and the next event id
//! - Logical clock used to stamp events
//! - The suspended effect waiting on a choice, if any
//! - The game outcome, once ended
//!
//! A `Snapshot` is a value. Every operation takes `&Snapshot` and returns a
//! new one; the `im` collections inside make that clone O(1) and share all
//! unmodified structure with the original.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::error::EngineError;
use super::event::{EventKind, EventSink, GameEvent};
use super::player::{PlayerId, PlayerMap};
use crate::cards::{CardDatabase, CardId};
use crate::choice::{Choice, ChoiceId};
use crate::effects::SuspendedEffect;
use crate::zones::{PlayerBoard, Supply};

/// How the game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Players tied for the highest score.
    pub winners: Vec<PlayerId>,
    /// Player whose draw ended the game.
    pub trigger: PlayerId,
}

/// Immutable game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    boards: PlayerMap<PlayerBoard>,
    supply: Supply,
    events: Vector<GameEvent>,
    next_event_id: u64,
    clock: u64,
    next_choice_id: u64,
    suspended: Option<SuspendedEffect>,
    outcome: Option<GameOutcome>,
}

impl Snapshot {
    /// Create the opening snapshot: empty boards and the given supply.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` is 0 or above 255; use [`Snapshot::for_config`]
    /// to get an error instead.
    #[must_use]
    pub fn new(player_count: usize, supply: Supply) -> Self {
        Self {
            boards: PlayerMap::with_default(player_count),
            supply,
            events: Vector::new(),
            next_event_id: 0,
            clock: 0,
            next_choice_id: 0,
            suspended: None,
            outcome: None,
        }
    }

    /// Opening snapshot seated for `config`, after validating it.
    pub fn for_config(config: &EngineConfig, supply: Supply) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::new(config.player_count, supply))
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.boards.player_count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    /// A player's board.
    pub fn board(&self, player: PlayerId) -> Result<&PlayerBoard, EngineError> {
        self.boards.get(player).ok_or(EngineError::UnknownPlayer { player })
    }

    /// All boards in seat order.
    pub fn boards(&self) -> impl Iterator<Item = (PlayerId, &PlayerBoard)> {
        self.boards.iter()
    }

    /// The shared supply.
    #[must_use]
    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    // === Event log ===

    /// The event log, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Number of logged events.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Id the next committed event must carry.
    #[must_use]
    pub fn next_event_id(&self) -> u64 {
        self.next_event_id
    }

    /// Logical clock stamped on new events.
    #[must_use]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// A sink for the events of the next step.
    #[must_use]
    pub fn event_sink(&self) -> EventSink {
        EventSink::starting_at(self.next_event_id, self.clock)
    }

    /// Append a sink's events to the log.
    ///
    /// Ids must continue exactly from `next_event_id`; anything else means
    /// two steps were built from different snapshots.
    pub fn commit(&self, events: Vec<GameEvent>) -> Result<Snapshot, EngineError> {
        let mut next = self.clone();
        for event in events {
            if event.id.0 != next.next_event_id {
                return Err(EngineError::EventOrder {
                    expected: next.next_event_id,
                    got: event.id.0,
                });
            }
            next.next_event_id += 1;
            next.events.push_back(event);
        }
        Ok(next)
    }

    /// Emit and commit events in one go (used by event consumers).
    pub fn record(
        &self,
        kinds: impl IntoIterator<Item = EventKind>,
    ) -> Result<Snapshot, EngineError> {
        let mut sink = self.event_sink();
        for kind in kinds {
            sink.emit(kind);
        }
        self.commit(sink.into_events())
    }

    /// Advance the logical clock (one tick per action at the action layer).
    #[must_use]
    pub fn tick(&self) -> Snapshot {
        let mut next = self.clone();
        next.clock += 1;
        next
    }

    // === Suspension ===

    /// The effect waiting on a choice, if any.
    #[must_use]
    pub fn suspended(&self) -> Option<&SuspendedEffect> {
        self.suspended.as_ref()
    }

    /// The outstanding choice, if any.
    #[must_use]
    pub fn pending_choice(&self) -> Option<&Choice> {
        self.suspended.as_ref().map(|suspended| &suspended.choice)
    }

    /// Id the next choice will receive.
    #[must_use]
    pub fn next_choice_id(&self) -> ChoiceId {
        ChoiceId(self.next_choice_id)
    }

    pub(crate) fn suspend(&self, suspended: SuspendedEffect) -> Snapshot {
        let mut next = self.clone();
        next.next_choice_id = next.next_choice_id.max(suspended.choice.id.0 + 1);
        next.suspended = Some(suspended);
        next
    }

    pub(crate) fn take_suspended(&self) -> Option<(Snapshot, SuspendedEffect)> {
        let mut next = self.clone();
        let suspended = next.suspended.take()?;
        Some((next, suspended))
    }

    // === Outcome ===

    /// How the game ended, if it has.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub(crate) fn end_game(&mut self, outcome: GameOutcome) {
        self.suspended = None;
        self.outcome = Some(outcome);
    }

    /// Sum of the ages of a player's scored cards.
    pub fn score_total(&self, db: &CardDatabase, player: PlayerId) -> Result<u32, EngineError> {
        self.board(player)?
            .score()
            .map(|card| db.get(card).map(|c| u32::from(c.age.value())))
            .sum()
    }

    // === Internal mutation on owned copies ===

    pub(crate) fn board_mut(&mut self, player: PlayerId) -> Result<&mut PlayerBoard, EngineError> {
        self.boards.get_mut(player).ok_or(EngineError::UnknownPlayer { player })
    }

    pub(crate) fn supply_mut(&mut self) -> &mut Supply {
        &mut self.supply
    }

    // === Audit ===

    /// How many times each card appears across supply and every zone.
    ///
    /// In any reachable snapshot every count is exactly 1.
    #[must_use]
    pub fn card_census(&self) -> FxHashMap<CardId, usize> {
        let mut census = FxHashMap::default();
        let cards = self
            .supply
            .all_cards()
            .chain(self.boards.iter().flat_map(|(_, board)| board.all_cards()));
        for card in cards {
            *census.entry(card).or_insert(0) += 1;
        }
        census
    }

    // === Persistence ===

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Snapshot, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
