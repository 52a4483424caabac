//! Primitive and composite state operations.
//!
//! - `Ops`: the primitives (draw, meld, score, tuck, splay, transfer,
//!   return, reveal) bound to a card database and configuration
//! - `DrawnMany`: result of the "draw then X" composites

mod composite;
mod primitives;

pub use composite::DrawnMany;
pub use primitives::{Drawn, Ops};
