//! A small sample card set for exercising the engine.
//!
//! Fifteen cards over ages 1-3, enough to cover every engine feature:
//! - Demands with and without choices (Archery, Oars, Mapmaking, Engineering)
//! - Shared non-demand effects (everything except Road Building)
//! - Two consecutive suspensions in one effect (Code of Laws)
//! - Every choice type: cards, yes/no, color (Philosophy), player (Road Building)
//! - Repetition through `Continue` (Foraging)
//! - Game end by drawing above age 3 (Optics, Agriculture on a 3)
//!
//! Supports 1-255 players; tests use 2-4.

mod cards;
mod effects;
mod game;

pub use cards::*;
pub use effects::*;
pub use game::{SampleGame, SampleGameBuilder};
