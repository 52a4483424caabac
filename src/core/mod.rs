//! Core engine types: players, snapshot, events, errors, RNG, configuration.
//!
//! Everything here is game-agnostic plumbing that the primitives, the icon
//! counters and the executor share.

pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use config::EngineConfig;
pub use error::EngineError;
pub use event::{EventId, EventKind, EventSink, GameEvent};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameOutcome, Snapshot};
