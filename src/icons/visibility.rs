//! Which icon slots of a color stack are visible.
//!
//! | Stack | Cards | Slots |
//! |---|---|---|
//! | 0-1 cards, or unsplayed | top card only | top |
//! | splayed left | every card | top, left |
//! | splayed right | every card | top, left, middle |
//! | splayed up | every card | all four |

use crate::cards::IconSlot;
use crate::zones::{ColorStack, SplayDirection};

const TOP: &[IconSlot] = &[IconSlot::Top];
const LEFT: &[IconSlot] = &[IconSlot::Top, IconSlot::Left];
const RIGHT: &[IconSlot] = &[IconSlot::Top, IconSlot::Left, IconSlot::Middle];
const UP: &[IconSlot] = &IconSlot::ALL;

/// Cards of a stack that contribute icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardScope {
    TopOnly,
    WholeStack,
}

/// Visible part of one stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility {
    pub scope: CardScope,
    pub slots: &'static [IconSlot],
}

/// Visible slot set for a splay direction, assuming at least two cards.
#[must_use]
pub fn slots_for(direction: SplayDirection) -> &'static [IconSlot] {
    match direction {
        SplayDirection::None => TOP,
        SplayDirection::Left => LEFT,
        SplayDirection::Right => RIGHT,
        SplayDirection::Up => UP,
    }
}

/// Visibility of a stack given its splay and size.
#[must_use]
pub fn visibility(stack: &ColorStack) -> Visibility {
    if stack.len() < 2 || stack.splay() == SplayDirection::None {
        return Visibility {
            scope: CardScope::TopOnly,
            slots: TOP,
        };
    }
    Visibility {
        scope: CardScope::WholeStack,
        slots: slots_for(stack.splay()),
    }
}
