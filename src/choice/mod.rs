//! Choice protocol: suspending an effect to ask one player a question.
//!
//! ## Flow
//!
//! 1. An effect returns a `ChoiceRequest` (who, what, constraints).
//! 2. The executor stamps it with a `ChoiceId`, stores the resulting
//!    `Choice` on the snapshot next to the suspended continuation, and
//!    yields.
//! 3. An external answerer (UI, bot) returns a `ChoiceAnswer` carrying the
//!    same id and player and a `Response` of the matching type.
//!
//! Whether a bad response is fatal depends on `Choice::optional`; see
//! `Choice::accept`.

mod answerer;
mod validate;

pub use answerer::{ChoiceAnswerer, DeclineAnswerer, RandomAnswerer, ScriptedAnswerer};
pub use validate::Accepted;

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Color};
use crate::core::PlayerId;
use crate::zones::Zone;

/// Unique identifier of a choice within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChoiceId(pub u64);

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Choice({})", self.0)
    }
}

/// Type tag shared by `ChoiceKind` and `Response`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceType {
    YesNo,
    SelectCards,
    SelectColor,
    SelectPlayer,
}

/// What is being asked, with its constraints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceKind {
    YesNo,
    SelectCards {
        min: usize,
        max: usize,
        /// Zone the cards are picked from.
        from: Zone,
        /// Player owning that zone.
        owner: PlayerId,
        eligible: Vec<CardId>,
    },
    /// Pick one color stack (a "pile").
    SelectColor { available: Vec<Color> },
    SelectPlayer { eligible: Vec<PlayerId> },
}

impl ChoiceKind {
    /// Type tag.
    #[must_use]
    pub fn choice_type(&self) -> ChoiceType {
        match self {
            ChoiceKind::YesNo => ChoiceType::YesNo,
            ChoiceKind::SelectCards { .. } => ChoiceType::SelectCards,
            ChoiceKind::SelectColor { .. } => ChoiceType::SelectColor,
            ChoiceKind::SelectPlayer { .. } => ChoiceType::SelectPlayer,
        }
    }
}

/// A choice as produced by an effect, before the executor assigns an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRequest {
    pub player: PlayerId,
    pub prompt: String,
    pub optional: bool,
    pub kind: ChoiceKind,
}

impl ChoiceRequest {
    /// A mandatory yes/no question.
    #[must_use]
    pub fn yes_no(player: PlayerId, prompt: impl Into<String>) -> Self {
        Self::new(player, prompt, ChoiceKind::YesNo)
    }

    /// Pick between `min` and `max` cards out of `eligible`, found in
    /// `owner`'s `from` zone.
    #[must_use]
    pub fn select_cards(
        player: PlayerId,
        prompt: impl Into<String>,
        owner: PlayerId,
        from: Zone,
        eligible: Vec<CardId>,
        min: usize,
        max: usize,
    ) -> Self {
        Self::new(
            player,
            prompt,
            ChoiceKind::SelectCards {
                min,
                max,
                from,
                owner,
                eligible,
            },
        )
    }

    /// Pick one of `available` colors.
    #[must_use]
    pub fn select_color(
        player: PlayerId,
        prompt: impl Into<String>,
        available: Vec<Color>,
    ) -> Self {
        Self::new(player, prompt, ChoiceKind::SelectColor { available })
    }

    /// Pick one of `eligible` players.
    #[must_use]
    pub fn select_player(
        player: PlayerId,
        prompt: impl Into<String>,
        eligible: Vec<PlayerId>,
    ) -> Self {
        Self::new(player, prompt, ChoiceKind::SelectPlayer { eligible })
    }

    fn new(player: PlayerId, prompt: impl Into<String>, kind: ChoiceKind) -> Self {
        Self {
            player,
            prompt: prompt.into(),
            optional: false,
            kind,
        }
    }

    /// Mark the choice as optional ("you may ...").
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Stamp with an id.
    #[must_use]
    pub fn into_choice(self, id: ChoiceId) -> Choice {
        Choice {
            id,
            player: self.player,
            prompt: self.prompt,
            optional: self.optional,
            kind: self.kind,
        }
    }
}

/// An outstanding question to exactly one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub player: PlayerId,
    pub prompt: String,
    pub optional: bool,
    pub kind: ChoiceKind,
}

/// A player's response, typed like the choice it answers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    YesNo(bool),
    Cards(Vec<CardId>),
    Color(Option<Color>),
    Player(Option<PlayerId>),
}

impl Response {
    /// Type tag.
    #[must_use]
    pub fn choice_type(&self) -> ChoiceType {
        match self {
            Response::YesNo(_) => ChoiceType::YesNo,
            Response::Cards(_) => ChoiceType::SelectCards,
            Response::Color(_) => ChoiceType::SelectColor,
            Response::Player(_) => ChoiceType::SelectPlayer,
        }
    }
}

/// An answer to a specific choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceAnswer {
    pub choice_id: ChoiceId,
    pub player: PlayerId,
    pub response: Response,
}

impl ChoiceAnswer {
    /// Answer `choice` as its addressee.
    #[must_use]
    pub fn to(choice: &Choice, response: Response) -> Self {
        Self {
            choice_id: choice.id,
            player: choice.player,
            response,
        }
    }

    /// The yes/no value, if this is a yes/no answer.
    #[must_use]
    pub fn yes(&self) -> Option<bool> {
        match self.response {
            Response::YesNo(yes) => Some(yes),
            _ => None,
        }
    }

    /// The selected cards, if this is a card selection.
    #[must_use]
    pub fn cards(&self) -> Option<&[CardId]> {
        match &self.response {
            Response::Cards(cards) => Some(cards),
            _ => None,
        }
    }

    /// The selected color, if one was picked.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self.response {
            Response::Color(color) => color,
            _ => None,
        }
    }

    /// The selected player, if one was picked.
    #[must_use]
    pub fn selected_player(&self) -> Option<PlayerId> {
        match self.response {
            Response::Player(player) => player,
            _ => None,
        }
    }
}
