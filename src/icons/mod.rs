//! Icon visibility, counting, and symbol comparison.
//!
//! - `visibility`: which slots of a stack show, given its splay
//! - `counting`: per-player visible icon totals
//! - `comparison`: classify players by count; demand and share targeting

pub mod comparison;
pub mod counting;
pub mod visibility;

pub use comparison::{compare_icons, demand_targets, share_targets, IconComparison, PlayerSet};
pub use counting::{count_icons, has_icon, icon_counts, IconCounts};
pub use visibility::{visibility, CardScope, Visibility};
