//! Card definitions - immutable reference data.
//!
//! A `Card` is the printed card: its age, color, the icon in each of its
//! four slots, and the dogma icon its effects are keyed on. Where a card
//! currently sits is never stored here; that lives in the `Snapshot`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card. Each card exists exactly once in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card age (1-10 for printed cards; higher values only appear as draw
/// requests, which end the game).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Age(pub u8);

impl Age {
    /// Create a new age.
    #[must_use]
    pub const fn new(age: u8) -> Self {
        Self(age)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Card color. Each player's board holds at most one stack per color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    /// All colors in board order.
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        };
        f.write_str(name)
    }
}

/// Icons printed in card slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Icon {
    Castle,
    Crown,
    Leaf,
    Lightbulb,
    Factory,
    Clock,
}

impl Icon {
    /// All icons, in `IconCounts` index order.
    pub const ALL: [Icon; 6] = [
        Icon::Castle,
        Icon::Crown,
        Icon::Leaf,
        Icon::Lightbulb,
        Icon::Factory,
        Icon::Clock,
    ];

    /// Position of this icon in `Icon::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Icon::Castle => "castle",
            Icon::Crown => "crown",
            Icon::Leaf => "leaf",
            Icon::Lightbulb => "lightbulb",
            Icon::Factory => "factory",
            Icon::Clock => "clock",
        };
        f.write_str(name)
    }
}

/// The four icon positions on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconSlot {
    Top,
    Left,
    Middle,
    Right,
}

impl IconSlot {
    /// All slots in storage order.
    pub const ALL: [IconSlot; 4] = [
        IconSlot::Top,
        IconSlot::Left,
        IconSlot::Middle,
        IconSlot::Right,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Immutable card record.
///
/// ## Example
///
/// ```
/// use dogma_engine::cards::{Age, Card, CardId, Color, Icon, IconSlot};
///
/// let card = Card::new(CardId::new(1), "Stonework", Age::new(1), Color::Red, Icon::Castle)
///     .with_icon(IconSlot::Top, Icon::Castle)
///     .with_icon(IconSlot::Middle, Icon::Castle);
///
/// assert_eq!(card.icon(IconSlot::Middle), Some(Icon::Castle));
/// assert_eq!(card.icon(IconSlot::Right), None);
/// assert_eq!(card.icon_total(Icon::Castle), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Age of the supply pile the card belongs to.
    pub age: Age,

    /// Stack the card joins on a board.
    pub color: Color,

    /// Icon per slot, indexed by `IconSlot`.
    slots: [Option<Icon>; 4],

    /// Icon compared for demand targeting and sharing.
    pub dogma_icon: Icon,
}

impl Card {
    /// Create a card with all slots empty.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        age: Age,
        color: Color,
        dogma_icon: Icon,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            color,
            slots: [None; 4],
            dogma_icon,
        }
    }

    /// Put an icon in a slot (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, slot: IconSlot, icon: Icon) -> Self {
        self.slots[slot.index()] = Some(icon);
        self
    }

    /// Icon printed in a slot.
    #[must_use]
    pub fn icon(&self, slot: IconSlot) -> Option<Icon> {
        self.slots[slot.index()]
    }

    /// Does any slot carry `icon`?
    #[must_use]
    pub fn has_icon(&self, icon: Icon) -> bool {
        self.slots.contains(&Some(icon))
    }

    /// Number of slots carrying `icon`, visible or not.
    #[must_use]
    pub fn icon_total(&self, icon: Icon) -> usize {
        self.slots.iter().filter(|slot| **slot == Some(icon)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_icon_index_matches_all() {
        for (i, icon) in Icon::ALL.iter().enumerate() {
            assert_eq!(icon.index(), i);
        }
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new(CardId::new(9), "Canals", Age::new(2), Color::Yellow, Icon::Crown)
            .with_icon(IconSlot::Left, Icon::Crown)
            .with_icon(IconSlot::Right, Icon::Leaf);

        assert_eq!(card.icon(IconSlot::Top), None);
        assert_eq!(card.icon(IconSlot::Left), Some(Icon::Crown));
        assert!(card.has_icon(Icon::Leaf));
        assert!(!card.has_icon(Icon::Clock));
    }

    #[test]
    fn test_color_ordering() {
        assert!(Color::Red < Color::Purple);
        assert_eq!(Color::ALL.len(), 5);
        assert_eq!(Color::Green.to_string(), "green");
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardId::new(1), "Test", Age::new(3), Color::Blue, Icon::Lightbulb)
            .with_icon(IconSlot::Top, Icon::Lightbulb);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
