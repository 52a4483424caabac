//! Sample card data.

use crate::cards::{Age, Card, CardId, Color, Icon, IconSlot};

pub const ARCHERY: CardId = CardId::new(1);
pub const OARS: CardId = CardId::new(2);
pub const WRITING: CardId = CardId::new(3);
pub const CODE_OF_LAWS: CardId = CardId::new(4);
pub const AGRICULTURE: CardId = CardId::new(5);
pub const FORAGING: CardId = CardId::new(6);
pub const SAILING: CardId = CardId::new(7);
pub const THE_WHEEL: CardId = CardId::new(8);
pub const PHILOSOPHY: CardId = CardId::new(9);
pub const ROAD_BUILDING: CardId = CardId::new(10);
pub const MAPMAKING: CardId = CardId::new(11);
pub const CALENDAR: CardId = CardId::new(12);
pub const ENGINEERING: CardId = CardId::new(13);
pub const TRANSLATION: CardId = CardId::new(14);
pub const OPTICS: CardId = CardId::new(15);

/// Highest age in the sample set. Drawing above it ends the game.
pub const MAX_AGE: u8 = 3;

type Slots = [Option<Icon>; 4];

fn card(id: CardId, name: &str, age: u8, color: Color, dogma_icon: Icon) -> Card {
    Card::new(id, name, Age::new(age), color, dogma_icon)
}

trait WithSlots {
    fn slots(self, slots: Slots) -> Card;
}

impl WithSlots for Card {
    fn slots(self, slots: Slots) -> Card {
        IconSlot::ALL
            .into_iter()
            .zip(slots)
            .fold(self, |card, (slot, icon)| match icon {
                Some(icon) => card.with_icon(slot, icon),
                None => card,
            })
    }
}

/// Every sample card. Slots are listed top, left, middle, right.
#[must_use]
pub fn sample_cards() -> Vec<Card> {
    use Color::*;
    use Icon::*;

    vec![
        card(ARCHERY, "Archery", 1, Red, Castle)
            .slots([Some(Castle), Some(Lightbulb), None, Some(Castle)]),
        card(OARS, "Oars", 1, Red, Castle)
            .slots([Some(Castle), Some(Crown), None, Some(Castle)]),
        card(WRITING, "Writing", 1, Blue, Lightbulb)
            .slots([Some(Lightbulb), None, Some(Lightbulb), Some(Crown)]),
        card(CODE_OF_LAWS, "Code of Laws", 1, Purple, Crown)
            .slots([Some(Crown), None, Some(Crown), Some(Leaf)]),
        card(AGRICULTURE, "Agriculture", 1, Yellow, Leaf)
            .slots([Some(Leaf), None, Some(Leaf), Some(Leaf)]),
        card(FORAGING, "Foraging", 1, Green, Leaf)
            .slots([Some(Leaf), Some(Leaf), None, Some(Castle)]),
        card(SAILING, "Sailing", 1, Green, Crown)
            .slots([Some(Crown), Some(Crown), None, Some(Leaf)]),
        card(THE_WHEEL, "The Wheel", 1, Green, Castle)
            .slots([Some(Castle), None, Some(Castle), Some(Castle)]),
        card(PHILOSOPHY, "Philosophy", 2, Purple, Lightbulb)
            .slots([Some(Lightbulb), None, Some(Lightbulb), Some(Lightbulb)]),
        card(ROAD_BUILDING, "Road Building", 2, Red, Castle)
            .slots([Some(Castle), None, Some(Castle), Some(Leaf)]),
        card(MAPMAKING, "Mapmaking", 2, Green, Crown)
            .slots([Some(Crown), None, Some(Crown), Some(Castle)]),
        card(CALENDAR, "Calendar", 2, Blue, Leaf)
            .slots([Some(Leaf), None, Some(Leaf), Some(Lightbulb)]),
        card(ENGINEERING, "Engineering", 3, Red, Castle)
            .slots([Some(Castle), None, Some(Lightbulb), Some(Castle)]),
        card(TRANSLATION, "Translation", 3, Blue, Crown)
            .slots([Some(Crown), None, Some(Crown), Some(Crown)]),
        card(OPTICS, "Optics", 3, Red, Crown)
            .slots([Some(Crown), Some(Crown), Some(Crown), None]),
    ]
}
