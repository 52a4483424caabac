//! Effect continuations: where a suspended effect picks up again.
//!
//! A continuation is plain data, a step number plus named values, so a
//! suspended effect survives serialization. Effects read what earlier steps
//! stored through the typed getters; a value that is absent or of the wrong
//! type is `MissingContinuationValue`.
//!
//! ## Value Types
//!
//! - `Int`, `Bool`: counters and flags
//! - `Card`, `Cards`: cards chosen or moved by earlier steps
//! - `Player`, `Players`: demand targets still owed a turn, and the like
//! - `Color`: a chosen pile

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Color};
use crate::choice::ChoiceAnswer;
use crate::core::{EngineError, PlayerId};

/// A value stored in a continuation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Card(CardId),
    Cards(Vec<CardId>),
    Player(PlayerId),
    Players(Vec<PlayerId>),
    Color(Color),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<CardId> for Value {
    fn from(v: CardId) -> Self {
        Value::Card(v)
    }
}

impl From<Vec<CardId>> for Value {
    fn from(v: Vec<CardId>) -> Self {
        Value::Cards(v)
    }
}

impl From<PlayerId> for Value {
    fn from(v: PlayerId) -> Self {
        Value::Player(v)
    }
}

impl From<Vec<PlayerId>> for Value {
    fn from(v: Vec<PlayerId>) -> Self {
        Value::Players(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}

/// Resumable effect state.
///
/// ```
/// use dogma_engine::cards::CardId;
/// use dogma_engine::effects::EffectContinuation;
///
/// let next = EffectContinuation::start()
///     .at(2)
///     .with("transferred", true)
///     .with("chosen", CardId::new(5));
///
/// assert_eq!(next.step(), 2);
/// assert!(next.bool("transferred").unwrap());
/// assert_eq!(next.card("chosen").unwrap(), CardId::new(5));
/// assert!(next.int("missing").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectContinuation {
    step: u16,
    values: OrdMap<String, Value>,
}

impl EffectContinuation {
    /// Step 0 with no values: how every effect run begins.
    #[must_use]
    pub fn start() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> u16 {
        self.step
    }

    /// The same values at another step.
    #[must_use]
    pub fn at(&self, step: u16) -> Self {
        Self {
            step,
            values: self.values.clone(),
        }
    }

    /// Store a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Drop a value.
    #[must_use]
    pub fn without(mut self, key: &str) -> Self {
        self.values.remove(key);
        self
    }

    /// Raw value lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Check if a value is stored.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn int(&self, key: &str) -> Result<i64, EngineError> {
        match self.get(key) {
            Some(Value::Int(v)) => Ok(*v),
            _ => Err(missing(key)),
        }
    }

    pub fn bool(&self, key: &str) -> Result<bool, EngineError> {
        match self.get(key) {
            Some(Value::Bool(v)) => Ok(*v),
            _ => Err(missing(key)),
        }
    }

    pub fn card(&self, key: &str) -> Result<CardId, EngineError> {
        match self.get(key) {
            Some(Value::Card(v)) => Ok(*v),
            _ => Err(missing(key)),
        }
    }

    pub fn cards(&self, key: &str) -> Result<&[CardId], EngineError> {
        match self.get(key) {
            Some(Value::Cards(v)) => Ok(v),
            _ => Err(missing(key)),
        }
    }

    pub fn player(&self, key: &str) -> Result<PlayerId, EngineError> {
        match self.get(key) {
            Some(Value::Player(v)) => Ok(*v),
            _ => Err(missing(key)),
        }
    }

    pub fn players(&self, key: &str) -> Result<&[PlayerId], EngineError> {
        match self.get(key) {
            Some(Value::Players(v)) => Ok(v),
            _ => Err(missing(key)),
        }
    }

    pub fn color(&self, key: &str) -> Result<Color, EngineError> {
        match self.get(key) {
            Some(Value::Color(v)) => Ok(*v),
            _ => Err(missing(key)),
        }
    }

    /// The answer a resumed step needs, or `MissingAnswer`.
    pub fn require_answer<'b>(
        &self,
        card: CardId,
        answer: Option<&'b ChoiceAnswer>,
    ) -> Result<&'b ChoiceAnswer, EngineError> {
        answer.ok_or(EngineError::MissingAnswer { card, step: self.step })
    }

    /// Error for a step the effect does not define.
    #[must_use]
    pub fn unknown_step(&self, card: CardId) -> EngineError {
        EngineError::UnknownStep { card, step: self.step }
    }
}

fn missing(key: &str) -> EngineError {
    EngineError::MissingContinuationValue { key: key.to_string() }
}
