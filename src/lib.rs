//! # dogma-engine
//!
//! A rules engine for card-driven strategy games in which cards carry
//! "dogma" effects that may stop mid-resolution to ask a player something.
//!
//! ## Design Principles
//!
//! 1. **Immutable Snapshots**: Every operation takes `&Snapshot` and returns a
//!    new one. `im` persistent collections make this O(1) per clone.
//!
//! 2. **Resumable Effects**: Effect functions return `NeedChoice` with a
//!    serializable continuation instead of blocking. A suspended game is
//!    plain data and can be saved, shipped and resumed elsewhere.
//!
//! 3. **N-Player First**: Every API takes `player_count` as context.
//!    No convenience methods that assume 2 players.
//!
//! 4. **Deterministic**: Event timestamps come from a logical clock and all
//!    randomness from a seeded `GameRng`, so identical inputs replay
//!    byte-identically.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors, events, snapshots
//! - `cards`: card data and the card database
//! - `zones`: color stacks, boards, supply
//! - `ops`: primitive and composite state operations
//! - `icons`: icon visibility, counting, comparison, demand targeting
//! - `choice`: the choice protocol and answerers
//! - `effects`: continuations, the effect registry, the executor
//! - `games`: a sample card set

pub mod core;
pub mod cards;
pub mod zones;
pub mod ops;
pub mod icons;
pub mod choice;
pub mod effects;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, EngineError,
    EventId, EventKind, EventSink, GameEvent,
    PlayerId, PlayerMap,
    GameRng, GameRngState,
    GameOutcome, Snapshot,
};

pub use crate::cards::{Age, Card, CardDatabase, CardId, Color, Icon, IconSlot};

pub use crate::zones::{ColorStack, PlayerBoard, SplayDirection, Supply, Zone};

pub use crate::ops::{Drawn, DrawnMany, Ops};

pub use crate::icons::{
    compare_icons, count_icons, demand_targets, share_targets, IconComparison, IconCounts,
};

pub use crate::choice::{
    Choice, ChoiceAnswer, ChoiceAnswerer, ChoiceId, ChoiceKind, ChoiceRequest, ChoiceType, Response,
    DeclineAnswerer, RandomAnswerer, ScriptedAnswerer,
};

pub use crate::effects::{
    Activation, EffectContext, EffectContinuation, EffectDefinition, EffectFn, EffectKind,
    EffectRegistry, EffectResult, EventConsumer, Executor, ExecutorState, ResolutionStatus,
    SuspendedEffect,
};
