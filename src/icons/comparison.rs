//! Symbol comparison and demand/share targeting.
//!
//! Targets are computed from the snapshot passed in, never cached: an
//! effect that changes boards mid-run sees the new counts on its next call.

use smallvec::SmallVec;

use super::counting::count_icons;
use crate::cards::{CardDatabase, Icon};
use crate::core::{EngineError, PlayerId, PlayerMap, Snapshot};

/// A small set of players, in seat order unless stated otherwise.
pub type PlayerSet = SmallVec<[PlayerId; 4]>;

/// Every player's count of one icon, classified.
///
/// Ties place a player in several sets: two players tied for the maximum
/// both appear in `most`, and with equal counts everyone is in both `most`
/// and `least`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconComparison {
    pub icon: Icon,
    pub counts: PlayerMap<u32>,
    pub most: PlayerSet,
    pub least: PlayerSet,
    /// Count ≥ threshold. Empty when no threshold was given.
    pub at_least: PlayerSet,
    /// Count < threshold. Empty when no threshold was given.
    pub below: PlayerSet,
}

/// Count `icon` for every player and classify.
pub fn compare_icons(
    snapshot: &Snapshot,
    db: &CardDatabase,
    icon: Icon,
    threshold: Option<u32>,
) -> Result<IconComparison, EngineError> {
    let player_count = snapshot.player_count();
    let mut counts = PlayerMap::with_value(player_count, 0u32);
    for player in snapshot.player_ids() {
        counts[player] = count_icons(snapshot, db, player, icon)?;
    }

    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let min = counts.iter().map(|(_, c)| *c).min().unwrap_or(0);
    let select = |keep: &dyn Fn(u32) -> bool| -> PlayerSet {
        counts.iter().filter(|(_, c)| keep(**c)).map(|(p, _)| p).collect()
    };

    let most = select(&|c| c == max);
    let least = select(&|c| c == min);
    let (at_least, below) = match threshold {
        Some(t) => (select(&|c| c >= t), select(&|c| c < t)),
        None => (PlayerSet::new(), PlayerSet::new()),
    };

    Ok(IconComparison {
        icon,
        counts,
        most,
        least,
        at_least,
        below,
    })
}

/// Players affected by a demand: every other player with strictly fewer
/// `icon` than the activator, in turn order after the activator.
pub fn demand_targets(
    snapshot: &Snapshot,
    db: &CardDatabase,
    activator: PlayerId,
    icon: Icon,
) -> Result<PlayerSet, EngineError> {
    let own = count_icons(snapshot, db, activator, icon)?;
    let mut targets = PlayerSet::new();
    for player in activator.others_in_turn_order(snapshot.player_count()) {
        if count_icons(snapshot, db, player, icon)? < own {
            targets.push(player);
        }
    }
    Ok(targets)
}

/// Players who share a non-demand effect: every other player with at least
/// as many `icon` as the activator, in turn order after the activator.
pub fn share_targets(
    snapshot: &Snapshot,
    db: &CardDatabase,
    activator: PlayerId,
    icon: Icon,
) -> Result<PlayerSet, EngineError> {
    let own = count_icons(snapshot, db, activator, icon)?;
    let mut targets = PlayerSet::new();
    for player in activator.others_in_turn_order(snapshot.player_count()) {
        if count_icons(snapshot, db, player, icon)? >= own {
            targets.push(player);
        }
    }
    Ok(targets)
}
