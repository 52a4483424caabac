//! Card database for definition lookup.
//!
//! The `CardDatabase` is the card content provider: every primitive and
//! every icon count resolves card ids through it. It is read-only once the
//! game starts and is never stored in a snapshot.

use rustc_hash::FxHashMap;

use super::definition::{Age, Card, CardId};
use crate::core::EngineError;

/// Database of immutable card records.
///
/// ## Example
///
/// ```
/// use dogma_engine::cards::{Age, Card, CardDatabase, CardId, Color, Icon};
///
/// let mut db = CardDatabase::new();
/// let sailing = Card::new(CardId::new(1), "Sailing", Age::new(1), Color::Green, Icon::Crown);
/// db.register(sailing).unwrap();
///
/// assert_eq!(db.get(CardId::new(1)).unwrap().name, "Sailing");
/// assert!(db.get(CardId::new(2)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardDatabase {
    cards: FxHashMap<CardId, Card>,
}

impl CardDatabase {
    /// Create a new empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a database from a list of cards.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, EngineError> {
        let mut db = Self::new();
        for card in cards {
            db.register(card)?;
        }
        Ok(db)
    }

    /// Register a card. Ids must be unique.
    pub fn register(&mut self, card: Card) -> Result<(), EngineError> {
        if self.cards.contains_key(&card.id) {
            return Err(EngineError::DuplicateCard { card: card.id });
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Look up a card. A missing id is a data integrity bug.
    pub fn get(&self, id: CardId) -> Result<&Card, EngineError> {
        self.cards.get(&id).ok_or(EngineError::UnknownCard { card: id })
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the database is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All card ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        let mut ids: Vec<_> = self.cards.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Ids of the cards of one age, ascending.
    #[must_use]
    pub fn ids_of_age(&self, age: Age) -> Vec<CardId> {
        let mut ids: Vec<_> = self
            .cards
            .values()
            .filter(|card| card.age == age)
            .map(|card| card.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over all cards (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Icon};

    fn card(id: u32, age: u8) -> Card {
        Card::new(CardId::new(id), format!("Card {id}"), Age::new(age), Color::Red, Icon::Castle)
    }

    #[test]
    fn test_register_and_get() {
        let mut db = CardDatabase::new();
        db.register(card(1, 1)).unwrap();

        assert_eq!(db.get(CardId::new(1)).unwrap().age, Age::new(1));
        assert_eq!(
            db.get(CardId::new(99)),
            Err(EngineError::UnknownCard { card: CardId::new(99) })
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut db = CardDatabase::new();
        db.register(card(1, 1)).unwrap();

        assert_eq!(
            db.register(card(1, 2)),
            Err(EngineError::DuplicateCard { card: CardId::new(1) })
        );
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_ids_of_age_sorted() {
        let db = CardDatabase::from_cards([card(5, 2), card(3, 2), card(4, 1)]).unwrap();

        assert_eq!(db.ids_of_age(Age::new(2)), vec![CardId::new(3), CardId::new(5)]);
        assert_eq!(db.ids(), vec![CardId::new(3), CardId::new(4), CardId::new(5)]);
    }
}
