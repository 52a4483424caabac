//! The shared supply: one face-down pile per age.
//!
//! Piles are ordered bottom (index 0) to top (last). Draws take the top;
//! returned cards go to the bottom.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{Age, CardDatabase, CardId};
use crate::core::GameRng;

/// Age piles shared by all players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    piles: OrdMap<Age, Vector<CardId>>,
}

impl Supply {
    /// Create an empty supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a supply from explicit piles, each listed bottom to top.
    #[must_use]
    pub fn from_piles(piles: impl IntoIterator<Item = (Age, Vec<CardId>)>) -> Self {
        let mut supply = Self::new();
        for (age, cards) in piles {
            let pile = supply.piles.entry(age).or_insert_with(Vector::new);
            pile.extend(cards);
        }
        supply
    }

    /// Put every card of `db` into its age pile, shuffled.
    #[must_use]
    pub fn shuffled(db: &CardDatabase, rng: &mut GameRng) -> Self {
        let mut ages: Vec<Age> = db.iter().map(|card| card.age).collect();
        ages.sort_unstable();
        ages.dedup();

        Self::from_piles(ages.into_iter().map(|age| {
            let mut cards = db.ids_of_age(age);
            rng.shuffle(&mut cards);
            (age, cards)
        }))
    }

    /// Cards of one pile, bottom to top.
    pub fn pile(&self, age: Age) -> impl Iterator<Item = CardId> + '_ {
        self.piles.get(&age).into_iter().flat_map(|pile| pile.iter().copied())
    }

    /// Number of cards in one pile.
    #[must_use]
    pub fn pile_len(&self, age: Age) -> usize {
        self.piles.get(&age).map_or(0, Vector::len)
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.piles.values().map(Vector::len).sum()
    }

    /// Every card in the supply.
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.piles.values().flat_map(|pile| pile.iter().copied())
    }

    /// The pile a draw of `requested` actually takes from.
    ///
    /// The requested pile if non-empty; otherwise the lowest non-empty pile
    /// above it; otherwise the lowest non-empty pile of any age.
    #[must_use]
    pub fn draw_age(&self, requested: Age) -> Option<Age> {
        let non_empty = || {
            self.piles
                .iter()
                .filter(|(_, pile)| !pile.is_empty())
                .map(|(age, _)| *age)
        };
        non_empty()
            .find(|age| *age >= requested)
            .or_else(|| non_empty().next())
    }

    pub(crate) fn take_top(&mut self, age: Age) -> Option<CardId> {
        self.piles.get_mut(&age)?.pop_back()
    }

    pub(crate) fn return_to_bottom(&mut self, age: Age, card: CardId) {
        self.piles.entry(age).or_insert_with(Vector::new).push_front(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Color, Icon};

    fn ids(raw: &[u32]) -> Vec<CardId> {
        raw.iter().copied().map(CardId::new).collect()
    }

    #[test]
    fn test_draw_age_prefers_requested() {
        let supply = Supply::from_piles([(Age::new(1), ids(&[1])), (Age::new(2), ids(&[2]))]);
        assert_eq!(supply.draw_age(Age::new(1)), Some(Age::new(1)));
    }

    #[test]
    fn test_draw_age_falls_forward_then_back() {
        let supply = Supply::from_piles([
            (Age::new(1), ids(&[1])),
            (Age::new(5), vec![]),
            (Age::new(6), ids(&[6])),
            (Age::new(7), ids(&[7])),
        ]);
        assert_eq!(supply.draw_age(Age::new(5)), Some(Age::new(6)));
        assert_eq!(supply.draw_age(Age::new(8)), Some(Age::new(1)));
        assert_eq!(Supply::new().draw_age(Age::new(1)), None);
    }

    #[test]
    fn test_take_top_and_return_to_bottom() {
        let mut supply = Supply::from_piles([(Age::new(1), ids(&[1, 2, 3]))]);

        assert_eq!(supply.take_top(Age::new(1)), Some(CardId::new(3)));
        supply.return_to_bottom(Age::new(1), CardId::new(9));

        let pile: Vec<_> = supply.pile(Age::new(1)).collect();
        assert_eq!(pile, ids(&[9, 1, 2]));
        assert_eq!(supply.take_top(Age::new(4)), None);
    }

    #[test]
    fn test_shuffled_places_every_card() {
        let db = CardDatabase::from_cards((1..=6).map(|i| {
            Card::new(CardId::new(i), "c", Age::new((i % 3 + 1) as u8), Color::Red, Icon::Leaf)
        }))
        .unwrap();

        let supply = Supply::shuffled(&db, &mut GameRng::new(3));

        assert_eq!(supply.total(), 6);
        assert_eq!(supply.pile_len(Age::new(1)), 2);
    }
}
