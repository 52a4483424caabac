//! Game implementations built on the engine.
//!
//! - `sample`: a fifteen-card set used by the tests and docs

pub mod sample;
