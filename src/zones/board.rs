//! Player boards: hand, score pile, and one color stack per color.
//!
//! All collections are `im` persistent structures. A board inside a
//! snapshot is only ever modified through a clone of that snapshot, so the
//! copy-on-write nodes keep every earlier snapshot intact.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Color};

/// How a color stack is fanned out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplayDirection {
    /// Squared up; only the top card shows.
    #[default]
    None,
    Left,
    Right,
    Up,
}

impl std::fmt::Display for SplayDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SplayDirection::None => "none",
            SplayDirection::Left => "left",
            SplayDirection::Right => "right",
            SplayDirection::Up => "up",
        };
        f.write_str(name)
    }
}

/// One color's pile on a board, bottom (index 0) to top (last).
///
/// Invariant: `splay` is `None` whenever the stack holds fewer than two
/// cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStack {
    color: Color,
    cards: Vector<CardId>,
    splay: SplayDirection,
}

impl ColorStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            cards: Vector::new(),
            splay: SplayDirection::None,
        }
    }

    /// Color of the stack.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Current splay direction.
    #[must_use]
    pub fn splay(&self) -> SplayDirection {
        self.splay
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The visible top card.
    #[must_use]
    pub fn top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Cards bottom to top.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    /// Check if the stack holds `card` at any depth.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    pub(crate) fn push_top(&mut self, card: CardId) {
        self.cards.push_back(card);
    }

    pub(crate) fn push_bottom(&mut self, card: CardId) {
        self.cards.push_front(card);
    }

    /// Set the splay; returns `false` (leaving the stack unchanged) when
    /// fewer than two cards are present.
    pub(crate) fn set_splay(&mut self, direction: SplayDirection) -> bool {
        if self.cards.len() < 2 {
            return false;
        }
        self.splay = direction;
        true
    }

    pub(crate) fn remove(&mut self, card: CardId) -> bool {
        let Some(index) = self.cards.index_of(&card) else {
            return false;
        };
        self.cards.remove(index);
        if self.cards.len() < 2 {
            self.splay = SplayDirection::None;
        }
        true
    }
}

/// Everything one player owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBoard {
    hand: Vector<CardId>,
    score: Vector<CardId>,
    stacks: OrdMap<Color, ColorStack>,
}

impl PlayerBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in hand; the most recently added card is last.
    pub fn hand(&self) -> impl Iterator<Item = CardId> + '_ {
        self.hand.iter().copied()
    }

    /// Number of cards in hand.
    #[must_use]
    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    /// Cards in the score pile.
    pub fn score(&self) -> impl Iterator<Item = CardId> + '_ {
        self.score.iter().copied()
    }

    /// Number of cards in the score pile.
    #[must_use]
    pub fn score_len(&self) -> usize {
        self.score.len()
    }

    /// Check if `card` is in hand.
    #[must_use]
    pub fn in_hand(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Check if `card` is in the score pile.
    #[must_use]
    pub fn in_score(&self, card: CardId) -> bool {
        self.score.contains(&card)
    }

    /// The stack of `color`, if present.
    #[must_use]
    pub fn stack(&self, color: Color) -> Option<&ColorStack> {
        self.stacks.get(&color)
    }

    /// All stacks in color order.
    pub fn stacks(&self) -> impl Iterator<Item = &ColorStack> {
        self.stacks.values()
    }

    /// Color of the stack holding `card`, if any.
    #[must_use]
    pub fn stack_of(&self, card: CardId) -> Option<Color> {
        self.stacks
            .values()
            .find(|stack| stack.contains(card))
            .map(ColorStack::color)
    }

    /// Top card of every stack, in color order.
    pub fn top_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.stacks.values().filter_map(ColorStack::top)
    }

    /// Every card this player holds in any zone.
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.hand()
            .chain(self.score())
            .chain(self.stacks.values().flat_map(ColorStack::cards))
    }

    pub(crate) fn add_to_hand(&mut self, card: CardId) {
        self.hand.push_back(card);
    }

    pub(crate) fn remove_from_hand(&mut self, card: CardId) -> bool {
        remove_first(&mut self.hand, card)
    }

    pub(crate) fn add_to_score(&mut self, card: CardId) {
        self.score.push_back(card);
    }

    pub(crate) fn remove_from_score(&mut self, card: CardId) -> bool {
        remove_first(&mut self.score, card)
    }

    pub(crate) fn meld_on_top(&mut self, color: Color, card: CardId) {
        self.stacks
            .entry(color)
            .or_insert_with(|| ColorStack::new(color))
            .push_top(card);
    }

    pub(crate) fn tuck_under(&mut self, color: Color, card: CardId) {
        self.stacks
            .entry(color)
            .or_insert_with(|| ColorStack::new(color))
            .push_bottom(card);
    }

    pub(crate) fn set_splay(&mut self, color: Color, direction: SplayDirection) -> bool {
        self.stacks
            .get_mut(&color)
            .is_some_and(|stack| stack.set_splay(direction))
    }

    /// Remove `card` from the `color` stack, dropping the stack if emptied.
    pub(crate) fn remove_from_stack(&mut self, color: Color, card: CardId) -> bool {
        let Some(stack) = self.stacks.get_mut(&color) else {
            return false;
        };
        if !stack.remove(card) {
            return false;
        }
        if stack.is_empty() {
            self.stacks.remove(&color);
        }
        true
    }
}

fn remove_first(cards: &mut Vector<CardId>, card: CardId) -> bool {
    match cards.index_of(&card) {
        Some(index) => {
            cards.remove(index);
            true
        }
        None => false,
    }
}
