//! "Draw then X" composites.
//!
//! A large share of card text reads "draw and meld a 3" or "draw and score
//! two 1s". These helpers loop `count` times, drawing and then applying the
//! second primitive to the card just drawn. They hold no state of their own
//! and re-raise any primitive failure. A draw that ends the game stops the
//! loop early.

use super::primitives::Ops;
use crate::cards::{Age, CardId};
use crate::core::{EngineError, EventSink, PlayerId, Snapshot};
use crate::zones::SplayDirection;

/// Result of a composite: the final snapshot and the cards drawn, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawnMany {
    pub snapshot: Snapshot,
    pub cards: Vec<CardId>,
}

impl DrawnMany {
    /// The last card drawn, if any.
    #[must_use]
    pub fn last(&self) -> Option<CardId> {
        self.cards.last().copied()
    }
}

impl Ops<'_> {
    fn draw_then(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        age: Age,
        count: usize,
        events: &mut EventSink,
        then: impl Fn(&Snapshot, CardId, &mut EventSink) -> Result<Snapshot, EngineError>,
    ) -> Result<DrawnMany, EngineError> {
        let mut current = snapshot.clone();
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            let drawn = self.draw(&current, player, age, events)?;
            let Some(card) = drawn.card else {
                current = drawn.snapshot;
                break;
            };
            current = then(&drawn.snapshot, card, events)?;
            cards.push(card);
        }
        Ok(DrawnMany {
            snapshot: current,
            cards,
        })
    }

    /// Draw and meld `count` cards of `age`.
    pub fn draw_and_meld(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        age: Age,
        count: usize,
        events: &mut EventSink,
    ) -> Result<DrawnMany, EngineError> {
        self.draw_then(snapshot, player, age, count, events, |s, card, events| {
            self.meld(s, player, card, events)
        })
    }

    /// Draw and score `count` cards of `age`.
    pub fn draw_and_score(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        age: Age,
        count: usize,
        events: &mut EventSink,
    ) -> Result<DrawnMany, EngineError> {
        self.draw_then(snapshot, player, age, count, events, |s, card, events| {
            self.score(s, player, card, events)
        })
    }

    /// Draw and tuck `count` cards of `age`, each under its own color.
    pub fn draw_and_tuck(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        age: Age,
        count: usize,
        events: &mut EventSink,
    ) -> Result<DrawnMany, EngineError> {
        self.draw_then(snapshot, player, age, count, events, |s, card, events| {
            let color = self.db().get(card)?.color;
            self.tuck(s, player, card, color, events)
        })
    }

    /// Draw `count` cards of `age`, splaying the stack of each drawn
    /// card's color in `direction`. The drawn cards stay in hand.
    pub fn draw_and_splay(
        &self,
        snapshot: &Snapshot,
        player: PlayerId,
        age: Age,
        count: usize,
        direction: SplayDirection,
        events: &mut EventSink,
    ) -> Result<DrawnMany, EngineError> {
        self.draw_then(snapshot, player, age, count, events, |s, card, events| {
            let color = self.db().get(card)?.color;
            self.splay(s, player, color, direction, events)
        })
    }
}
