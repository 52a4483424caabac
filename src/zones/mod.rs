//! Card locations: player boards and the shared supply.
//!
//! - `PlayerBoard`: hand, score pile and color stacks of one player
//! - `ColorStack`: one color's pile with its splay direction
//! - `Supply`: shared age piles
//! - `Zone`: names a player-owned location for transfers and choices

mod board;
mod supply;

pub use board::{ColorStack, PlayerBoard, SplayDirection};
pub use supply::Supply;

use serde::{Deserialize, Serialize};

/// A player-owned zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand,
    /// The color stacks; a card's stack is derived from its color.
    Board,
    Score,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Hand => "hand",
            Zone::Board => "board",
            Zone::Score => "score pile",
        };
        f.write_str(name)
    }
}
