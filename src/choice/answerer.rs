//! Choice answerers: the engine's stand-ins for a player.
//!
//! The executor never decides anything on a player's behalf except on
//! timeout. Tests, simulations and bots answer through `ChoiceAnswerer`.

use std::collections::VecDeque;

use super::{Choice, ChoiceAnswer, ChoiceKind, Response};
use crate::core::{GameRng, GameRngState, Snapshot};

/// Something that answers choices.
pub trait ChoiceAnswerer {
    /// Answer `choice`, the pending choice of `snapshot`.
    fn answer(&mut self, snapshot: &Snapshot, choice: &Choice) -> ChoiceAnswer;
}

/// Always gives the choice's default: decline if optional, otherwise the
/// first valid pick.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclineAnswerer;

impl ChoiceAnswerer for DeclineAnswerer {
    fn answer(&mut self, _snapshot: &Snapshot, choice: &Choice) -> ChoiceAnswer {
        ChoiceAnswer::to(choice, choice.default_response())
    }
}

/// Picks a uniformly random valid response.
#[derive(Clone, Debug)]
pub struct RandomAnswerer {
    rng: GameRng,
}

impl RandomAnswerer {
    /// Create with a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    /// Checkpoint the RNG.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Resume from a checkpoint.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self {
            rng: GameRng::from_state(state),
        }
    }
}

impl ChoiceAnswerer for RandomAnswerer {
    fn answer(&mut self, _snapshot: &Snapshot, choice: &Choice) -> ChoiceAnswer {
        let response = match &choice.kind {
            ChoiceKind::YesNo => Response::YesNo(self.rng.gen_bool(0.5)),
            ChoiceKind::SelectCards { min, max, eligible, .. } => {
                let upper = (*max).min(eligible.len());
                let lower = (*min).min(upper);
                let count = self.rng.gen_range_usize(lower..upper + 1);
                let mut pool = eligible.clone();
                self.rng.shuffle(&mut pool);
                pool.truncate(count);
                Response::Cards(pool)
            }
            ChoiceKind::SelectColor { available } => {
                Response::Color(self.rng.choose(available).copied())
            }
            ChoiceKind::SelectPlayer { eligible } => {
                Response::Player(self.rng.choose(eligible).copied())
            }
        };
        ChoiceAnswer::to(choice, response)
    }
}

/// Replays a fixed list of responses, then falls back to defaults.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAnswerer {
    responses: VecDeque<Response>,
}

impl ScriptedAnswerer {
    /// Create from responses in the order they will be given.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
        }
    }

    /// Responses not yet used.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl ChoiceAnswerer for ScriptedAnswerer {
    fn answer(&mut self, _snapshot: &Snapshot, choice: &Choice) -> ChoiceAnswer {
        let response = self
            .responses
            .pop_front()
            .unwrap_or_else(|| choice.default_response());
        ChoiceAnswer::to(choice, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Color};
    use crate::choice::{ChoiceId, ChoiceRequest};
    use crate::core::PlayerId;
    use crate::zones::{Supply, Zone};

    fn snapshot() -> Snapshot {
        Snapshot::new(2, Supply::default())
    }

    fn cards_choice() -> Choice {
        ChoiceRequest::select_cards(
            PlayerId::new(0),
            "Pick",
            PlayerId::new(0),
            Zone::Hand,
            (1..=5).map(CardId::new).collect(),
            1,
            3,
        )
        .into_choice(ChoiceId(0))
    }

    #[test]
    fn test_random_answers_are_valid() {
        let mut answerer = RandomAnswerer::new(7);
        let choice = cards_choice();
        let colors = ChoiceRequest::select_color(
            PlayerId::new(0),
            "Pick",
            vec![Color::Red, Color::Green],
        )
            .into_choice(ChoiceId(1));

        for _ in 0..50 {
            let answer = answerer.answer(&snapshot(), &choice);
            assert!(choice.check(&answer.response).is_ok());
            let answer = answerer.answer(&snapshot(), &colors);
            assert!(colors.check(&answer.response).is_ok());
        }
    }

    #[test]
    fn test_random_checkpoint_resumes_sequence() {
        let choice = cards_choice();
        let mut a = RandomAnswerer::new(3);
        a.answer(&snapshot(), &choice);
        let mut b = RandomAnswerer::from_state(&a.state());

        assert_eq!(a.answer(&snapshot(), &choice), b.answer(&snapshot(), &choice));
    }

    #[test]
    fn test_scripted_falls_back_to_default() {
        let choice = ChoiceRequest::yes_no(
            PlayerId::new(0),
            "Splay?",
        )
        .optional().into_choice(ChoiceId(0));
        let mut answerer = ScriptedAnswerer::new([Response::YesNo(true)]);

        assert_eq!(answerer.answer(&snapshot(), &choice).yes(), Some(true));
        assert_eq!(answerer.remaining(), 0);
        assert_eq!(answerer.answer(&snapshot(), &choice).yes(), Some(false));
    }

    #[test]
    fn test_decline_answerer() {
        let choice = cards_choice();
        let answer = DeclineAnswerer.answer(&snapshot(), &choice);
        assert_eq!(answer.response, Response::Cards(vec![CardId::new(1)]));
    }
}
