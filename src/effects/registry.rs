//! Effect registry.
//!
//! A closed table from `(card, effect index)` to effect function, built once
//! at startup and checked against the card database with `validate`. Effect
//! functions are plain `fn` pointers: nothing about a running effect lives
//! outside its continuation.

use rustc_hash::FxHashMap;

use super::context::{EffectContext, EffectKind, EffectResult};
use super::continuation::EffectContinuation;
use crate::cards::{CardDatabase, CardId};
use crate::choice::ChoiceAnswer;
use crate::core::EngineError;

/// Signature of every effect function.
///
/// Called with a fresh continuation on activation, and with the stored
/// continuation plus the validated answer on resume.
pub type EffectFn = fn(
    &EffectContext<'_>,
    &EffectContinuation,
    Option<&ChoiceAnswer>,
) -> Result<EffectResult, EngineError>;

/// A registered effect.
#[derive(Clone, Copy)]
pub struct EffectDefinition {
    pub card: CardId,
    pub index: usize,
    pub kind: EffectKind,
    /// Sharers run this effect before the activator. Only honoured for
    /// non-demand effects.
    pub shared: bool,
    pub run: EffectFn,
}

impl EffectDefinition {
    /// A demand effect.
    #[must_use]
    pub fn demand(card: CardId, index: usize, run: EffectFn) -> Self {
        Self {
            card,
            index,
            kind: EffectKind::Demand,
            shared: false,
            run,
        }
    }

    /// A non-demand effect, not shared.
    #[must_use]
    pub fn non_demand(card: CardId, index: usize, run: EffectFn) -> Self {
        Self {
            card,
            index,
            kind: EffectKind::NonDemand,
            shared: false,
            run,
        }
    }

    /// Let sharing opponents execute this effect too (builder pattern).
    #[must_use]
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    /// Whether the executor will run this for sharers.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.shared && self.kind == EffectKind::NonDemand
    }
}

impl std::fmt::Debug for EffectDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectDefinition")
            .field("card", &self.card)
            .field("index", &self.index)
            .field("kind", &self.kind)
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

/// All effect functions of a card set.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    effects: FxHashMap<(CardId, usize), EffectDefinition>,
}

impl EffectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect. Each `(card, index)` may be registered once.
    pub fn register(&mut self, definition: EffectDefinition) -> Result<(), EngineError> {
        let key = (definition.card, definition.index);
        if self.effects.contains_key(&key) {
            return Err(EngineError::DuplicateEffect {
                card: definition.card,
                index: definition.index,
            });
        }
        self.effects.insert(key, definition);
        Ok(())
    }

    /// Register several effects (builder pattern).
    pub fn with(
        mut self,
        definitions: impl IntoIterator<Item = EffectDefinition>,
    ) -> Result<Self, EngineError> {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(self)
    }

    /// Look up an effect.
    pub fn get(&self, card: CardId, index: usize) -> Result<&EffectDefinition, EngineError> {
        self.effects
            .get(&(card, index))
            .ok_or(EngineError::UnregisteredEffect { card, index })
    }

    /// A card's effects in index order.
    #[must_use]
    pub fn effects_for(&self, card: CardId) -> Vec<&EffectDefinition> {
        let mut found: Vec<_> = self.effects.values().filter(|d| d.card == card).collect();
        found.sort_by_key(|d| d.index);
        found
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Check the table against the card database: every registered card
    /// exists, and every card has at least one effect.
    pub fn validate(&self, db: &CardDatabase) -> Result<(), EngineError> {
        let mut keys: Vec<_> = self.effects.keys().copied().collect();
        keys.sort();
        for (card, _) in keys {
            if !db.contains(card) {
                return Err(EngineError::UnknownCard { card });
            }
        }
        for card in db.ids() {
            if !self.effects.values().any(|d| d.card == card) {
                return Err(EngineError::MissingEffects { card });
            }
        }
        Ok(())
    }
}
