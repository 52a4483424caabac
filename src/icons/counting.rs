//! Icon counting over a player's board.
//!
//! Called from effect preconditions, demand targeting and achievement
//! checks, so it only reads: no allocation beyond the result, no events.

use serde::{Deserialize, Serialize};

use super::visibility::{visibility, CardScope};
use crate::cards::{CardDatabase, Icon};
use crate::core::{EngineError, PlayerId, Snapshot};
use crate::zones::{ColorStack, PlayerBoard};

/// Visible totals for every icon, indexed by `Icon::index`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconCounts([u32; 6]);

impl IconCounts {
    /// Total for one icon.
    #[must_use]
    pub fn get(&self, icon: Icon) -> u32 {
        self.0[icon.index()]
    }

    fn add(&mut self, icon: Icon) {
        self.0[icon.index()] += 1;
    }
}

/// Visible icons of one stack.
pub fn stack_counts(stack: &ColorStack, db: &CardDatabase) -> Result<IconCounts, EngineError> {
    let mut counts = IconCounts::default();
    let view = visibility(stack);
    let hidden = match view.scope {
        CardScope::TopOnly => stack.len().saturating_sub(1),
        CardScope::WholeStack => 0,
    };
    for id in stack.cards().skip(hidden) {
        let card = db.get(id)?;
        for slot in view.slots {
            if let Some(icon) = card.icon(*slot) {
                counts.add(icon);
            }
        }
    }
    Ok(counts)
}

/// Visible icons across a whole board.
pub fn board_counts(board: &PlayerBoard, db: &CardDatabase) -> Result<IconCounts, EngineError> {
    let mut total = IconCounts::default();
    for stack in board.stacks() {
        let counts = stack_counts(stack, db)?;
        for (slot, value) in total.0.iter_mut().zip(counts.0) {
            *slot += value;
        }
    }
    Ok(total)
}

/// Visible totals of every icon for a player.
pub fn icon_counts(
    snapshot: &Snapshot,
    db: &CardDatabase,
    player: PlayerId,
) -> Result<IconCounts, EngineError> {
    board_counts(snapshot.board(player)?, db)
}

/// Visible count of `icon` for a player.
pub fn count_icons(
    snapshot: &Snapshot,
    db: &CardDatabase,
    player: PlayerId,
    icon: Icon,
) -> Result<u32, EngineError> {
    Ok(icon_counts(snapshot, db, player)?.get(icon))
}

/// Does the player show at least one `icon`?
pub fn has_icon(
    snapshot: &Snapshot,
    db: &CardDatabase,
    player: PlayerId,
    icon: Icon,
) -> Result<bool, EngineError> {
    Ok(count_icons(snapshot, db, player, icon)? > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Age, Card, CardId, Color, IconSlot};
    use crate::zones::SplayDirection;

    fn db() -> CardDatabase {
        let full = |id: u32| {
            Card::new(CardId::new(id), "full", Age::new(1), Color::Red, Icon::Castle)
                .with_icon(IconSlot::Top, Icon::Castle)
                .with_icon(IconSlot::Left, Icon::Castle)
                .with_icon(IconSlot::Middle, Icon::Castle)
                .with_icon(IconSlot::Right, Icon::Castle)
        };
        CardDatabase::from_cards([full(1), full(2), full(3)]).unwrap()
    }

    fn stack(splay: SplayDirection) -> ColorStack {
        let mut stack = ColorStack::new(Color::Red);
        for id in 1..=3 {
            stack.push_top(CardId::new(id));
        }
        stack.set_splay(splay);
        stack
    }

    #[test]
    fn test_counts_per_splay() {
        let db = db();
        let expected = [
            (SplayDirection::None, 1),
            (SplayDirection::Left, 6),
            (SplayDirection::Right, 9),
            (SplayDirection::Up, 12),
        ];
        for (splay, count) in expected {
            let counts = stack_counts(&stack(splay), &db).unwrap();
            assert_eq!(counts.get(Icon::Castle), count, "splay {splay}");
        }
    }

    #[test]
    fn test_single_card_shows_top_slot_only() {
        let db = db();
        let mut single = ColorStack::new(Color::Red);
        single.push_top(CardId::new(1));

        assert_eq!(stack_counts(&single, &db).unwrap().get(Icon::Castle), 1);
    }

    #[test]
    fn test_unknown_card_is_an_error() {
        let mut bad = ColorStack::new(Color::Red);
        bad.push_top(CardId::new(42));

        assert_eq!(
            stack_counts(&bad, &db()),
            Err(EngineError::UnknownCard { card: CardId::new(42) })
        );
    }
}
