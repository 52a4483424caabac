//! Activation requests and the persisted state of a run in progress.

use serde::{Deserialize, Serialize};

use super::continuation::EffectContinuation;
use crate::cards::CardId;
use crate::choice::Choice;
use crate::core::PlayerId;

/// Request to execute one effect of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Activation {
    pub card: CardId,
    pub index: usize,
    pub activator: PlayerId,
}

impl Activation {
    #[must_use]
    pub const fn new(card: CardId, index: usize, activator: PlayerId) -> Self {
        Self { card, index, activator }
    }
}

/// One effect executing for a sequence of players.
///
/// `player` is executing now; `remaining` still get their turn, in order.
/// Without sharing both reduce to just the activator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRun {
    pub card: CardId,
    pub index: usize,
    pub activator: PlayerId,
    pub player: PlayerId,
    pub remaining: Vec<PlayerId>,
}

impl EffectRun {
    /// A run for `players` in order. `players` must not be empty.
    pub(crate) fn new(activation: Activation, players: &[PlayerId]) -> Self {
        let (player, remaining) = match players.split_first() {
            Some((first, rest)) => (*first, rest.to_vec()),
            None => (activation.activator, Vec::new()),
        };
        Self {
            card: activation.card,
            index: activation.index,
            activator: activation.activator,
            player,
            remaining,
        }
    }

    /// The run for the next player, if any.
    pub(crate) fn advance(mut self) -> Option<EffectRun> {
        if self.remaining.is_empty() {
            return None;
        }
        self.player = self.remaining.remove(0);
        Some(self)
    }
}

/// An effect waiting on a choice, stored on the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspendedEffect {
    pub run: EffectRun,
    /// Where the effect resumes.
    pub continuation: EffectContinuation,
    /// The outstanding choice.
    pub choice: Choice,
}
