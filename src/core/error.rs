//! Engine error type.
//!
//! Every failure in the engine is fatal to the operation that raised it:
//! operations are pure functions over in-memory data, so nothing is ever
//! retried. The only recovered condition (a bad answer to an optional
//! choice) is handled inside the executor and never surfaces as an error.

use thiserror::Error;

use crate::cards::{Age, CardId, Color};
use crate::choice::ChoiceId;
use crate::core::PlayerId;
use crate::zones::Zone;

/// Errors raised by primitives, the choice protocol and the executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{card} is not in {player}'s {zone}")]
    CardNotInZone {
        player: PlayerId,
        card: CardId,
        zone: Zone,
    },

    #[error("{card} is not in the card database")]
    UnknownCard { card: CardId },

    #[error("{card} is already in the card database")]
    DuplicateCard { card: CardId },

    #[error("{player} is not seated in this game")]
    UnknownPlayer { player: PlayerId },

    #[error("{player} cannot splay {color}: stack has {len} card(s)")]
    CannotSplay {
        player: PlayerId,
        color: Color,
        len: usize,
    },

    #[error("every supply pile is empty (requested age {requested})")]
    SupplyExhausted { requested: Age },

    #[error("the game has already ended")]
    GameOver,

    #[error("unknown continuation step {step} for {card}")]
    UnknownStep { card: CardId, step: u16 },

    #[error("continuation is missing value `{key}`")]
    MissingContinuationValue { key: String },

    #[error("mandatory step {step} of {card} resumed without a usable answer")]
    MissingAnswer { card: CardId, step: u16 },

    #[error("answer for {got_choice} by {got_player} does not match pending {expected_choice} for {expected_player}")]
    ChoiceMismatch {
        expected_choice: ChoiceId,
        expected_player: PlayerId,
        got_choice: ChoiceId,
        got_player: PlayerId,
    },

    #[error("{card} asked a choice nobody can answer: {reason}")]
    UnanswerableChoice { card: CardId, reason: String },

    #[error("snapshot seats {snapshot} players, configuration expects {config}")]
    PlayerCountMismatch { snapshot: usize, config: usize },

    #[error("invalid answer to mandatory {choice}: {reason}")]
    InvalidAnswer { choice: ChoiceId, reason: String },

    #[error("no choice is pending")]
    NoPendingChoice,

    #[error("{choice} is still waiting for {player}")]
    ChoicePending { choice: ChoiceId, player: PlayerId },

    #[error("no effect registered for {card} (effect {index})")]
    UnregisteredEffect { card: CardId, index: usize },

    #[error("effect {index} of {card} registered twice")]
    DuplicateEffect { card: CardId, index: usize },

    #[error("{card} has no registered effects")]
    MissingEffects { card: CardId },

    #[error("event id {got} does not follow {expected}")]
    EventOrder { expected: u64, got: u64 },

    #[error("{card} exceeded {limit} consecutive continue steps")]
    RepeatLimit { card: CardId, limit: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot persistence failed: {0}")]
    Persistence(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_card_not_in_zone() {
        let err = EngineError::CardNotInZone {
            player: PlayerId::new(1),
            card: CardId::new(7),
            zone: Zone::Hand,
        };
        assert_eq!(err.to_string(), "Card(7) is not in Player 1's hand");
    }

    #[test]
    fn test_display_unknown_step() {
        let err = EngineError::UnknownStep { card: CardId::new(3), step: 9 };
        assert_eq!(err.to_string(), "unknown continuation step 9 for Card(3)");
    }
}
