//! Answer validation, declines and default answers.

use log::warn;

use super::{Choice, ChoiceAnswer, ChoiceKind, ChoiceRequest, Response};
use crate::cards::CardId;
use crate::core::EngineError;

/// A validated answer, ready to hand to the effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accepted {
    pub answer: ChoiceAnswer,
    /// The submitted response was unusable and replaced by the decline.
    pub declined: bool,
}

impl ChoiceRequest {
    /// Check that at least one response satisfies this request.
    ///
    /// An optional request can always be declined, so only inverted card
    /// bounds make it unanswerable.
    pub fn check_answerable(&self) -> Result<(), String> {
        if let ChoiceKind::SelectCards { min, max, .. } = &self.kind {
            if min > max {
                return Err(format!("card bounds {min}..={max} are empty"));
            }
        }
        if self.optional {
            return Ok(());
        }
        match &self.kind {
            ChoiceKind::YesNo => Ok(()),
            ChoiceKind::SelectCards { min, eligible, .. } => {
                let distinct = distinct(eligible).len();
                if distinct < *min {
                    return Err(format!("needs {min} cards, only {distinct} eligible"));
                }
                Ok(())
            }
            ChoiceKind::SelectColor { available } if available.is_empty() => {
                Err("no color available".to_string())
            }
            ChoiceKind::SelectPlayer { eligible } if eligible.is_empty() => {
                Err("no player eligible".to_string())
            }
            ChoiceKind::SelectColor { .. } | ChoiceKind::SelectPlayer { .. } => Ok(()),
        }
    }
}

impl Choice {
    /// Validate an answer against this choice.
    ///
    /// - Wrong choice id or player: always fatal.
    /// - Wrong response type or violated constraint: fatal for a mandatory
    ///   choice, replaced by the decline response for an optional one.
    pub fn accept(&self, answer: ChoiceAnswer) -> Result<Accepted, EngineError> {
        if answer.choice_id != self.id || answer.player != self.player {
            return Err(EngineError::ChoiceMismatch {
                expected_choice: self.id,
                expected_player: self.player,
                got_choice: answer.choice_id,
                got_player: answer.player,
            });
        }

        match self.check(&answer.response) {
            Ok(()) => Ok(Accepted {
                answer,
                declined: false,
            }),
            Err(reason) if self.optional => {
                warn!(
                    "{} answered optional {} badly ({reason}); treating as decline",
                    self.player,
                    self.id,
                );
                Ok(Accepted {
                    answer: ChoiceAnswer::to(self, self.decline_response()),
                    declined: true,
                })
            }
            Err(reason) => Err(EngineError::InvalidAnswer { choice: self.id, reason }),
        }
    }

    /// Check a response's type and constraints.
    pub fn check(&self, response: &Response) -> Result<(), String> {
        if response.choice_type() != self.kind.choice_type() {
            return Err(format!(
                "expected {:?} response, got {:?}",
                self.kind.choice_type(),
                response.choice_type()
            ));
        }
        if self.optional && *response == self.decline_response() {
            return Ok(());
        }

        match (&self.kind, response) {
            (ChoiceKind::YesNo, Response::YesNo(_)) => Ok(()),
            (ChoiceKind::SelectCards { min, max, eligible, .. }, Response::Cards(cards)) => {
                if cards.len() < *min || cards.len() > *max {
                    return Err(format!("selected {} cards, allowed {min}..={max}", cards.len()));
                }
                for (i, card) in cards.iter().enumerate() {
                    if !eligible.contains(card) {
                        return Err(format!("{card} is not eligible"));
                    }
                    if cards[..i].contains(card) {
                        return Err(format!("{card} selected twice"));
                    }
                }
                Ok(())
            }
            (ChoiceKind::SelectColor { available }, Response::Color(color)) => match color {
                Some(color) if available.contains(color) => Ok(()),
                Some(color) => Err(format!("{color} is not available")),
                None => Err("no color selected".to_string()),
            },
            (ChoiceKind::SelectPlayer { eligible }, Response::Player(player)) => match player {
                Some(player) if eligible.contains(player) => Ok(()),
                Some(player) => Err(format!("{player} is not eligible")),
                None => Err("no player selected".to_string()),
            },
            _ => Err("response type mismatch".to_string()),
        }
    }

    /// The "no / nothing" response for this choice's type.
    #[must_use]
    pub fn decline_response(&self) -> Response {
        match self.kind {
            ChoiceKind::YesNo => Response::YesNo(false),
            ChoiceKind::SelectCards { .. } => Response::Cards(Vec::new()),
            ChoiceKind::SelectColor { .. } => Response::Color(None),
            ChoiceKind::SelectPlayer { .. } => Response::Player(None),
        }
    }

    /// The answer synthesized when nobody answers: decline for an optional
    /// choice, the first valid pick for a mandatory one.
    #[must_use]
    pub fn default_response(&self) -> Response {
        if self.optional {
            return self.decline_response();
        }
        match &self.kind {
            ChoiceKind::YesNo => Response::YesNo(false),
            ChoiceKind::SelectCards { min, eligible, .. } => {
                let mut picks = distinct(eligible);
                picks.truncate(*min);
                Response::Cards(picks)
            }
            ChoiceKind::SelectColor { available } => Response::Color(available.first().copied()),
            ChoiceKind::SelectPlayer { eligible } => Response::Player(eligible.first().copied()),
        }
    }
}

/// `cards` without repeats, first occurrence kept.
fn distinct(cards: &[CardId]) -> Vec<CardId> {
    let mut seen = Vec::with_capacity(cards.len());
    for &card in cards {
        if !seen.contains(&card) {
            seen.push(card);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;
    use crate::choice::{ChoiceId, ChoiceRequest};
    use crate::core::PlayerId;
    use crate::zones::Zone;

    fn cards_choice(optional: bool) -> Choice {
        let request = ChoiceRequest::select_cards(
            PlayerId::new(1),
            "Transfer a card",
            PlayerId::new(1),
            Zone::Hand,
            vec![CardId::new(1), CardId::new(2)],
            1,
            1,
        );
        let request = if optional { request.optional() } else { request };
        request.into_choice(ChoiceId(3))
    }

    #[test]
    fn test_accepts_valid_answer() {
        let choice = cards_choice(false);
        let accepted = choice
            .accept(ChoiceAnswer::to(&choice, Response::Cards(vec![CardId::new(2)])))
            .unwrap();

        assert!(!accepted.declined);
        assert_eq!(accepted.answer.cards(), Some(&[CardId::new(2)][..]));
    }

    #[test]
    fn test_mismatched_id_is_fatal_even_when_optional() {
        let choice = cards_choice(true);
        let mut answer = ChoiceAnswer::to(&choice, Response::Cards(vec![]));
        answer.choice_id = ChoiceId(99);

        assert!(matches!(choice.accept(answer), Err(EngineError::ChoiceMismatch { .. })));
    }

    #[test]
    fn test_mismatched_player_is_fatal() {
        let choice = cards_choice(false);
        let mut answer = ChoiceAnswer::to(&choice, Response::Cards(vec![CardId::new(1)]));
        answer.player = PlayerId::new(0);

        assert!(matches!(choice.accept(answer), Err(EngineError::ChoiceMismatch { .. })));
    }

    #[test]
    fn test_bad_mandatory_answer_is_fatal() {
        let choice = cards_choice(false);

        let wrong_type = ChoiceAnswer::to(&choice, Response::YesNo(true));
        assert!(matches!(choice.accept(wrong_type), Err(EngineError::InvalidAnswer { .. })));

        let ineligible = ChoiceAnswer::to(&choice, Response::Cards(vec![CardId::new(7)]));
        assert!(matches!(choice.accept(ineligible), Err(EngineError::InvalidAnswer { .. })));

        let too_few = ChoiceAnswer::to(&choice, Response::Cards(vec![]));
        assert!(matches!(choice.accept(too_few), Err(EngineError::InvalidAnswer { .. })));
    }

    #[test]
    fn test_bad_optional_answer_becomes_decline() {
        let choice = cards_choice(true);
        let accepted = choice
            .accept(ChoiceAnswer::to(&choice, Response::Color(Some(Color::Red))))
            .unwrap();

        assert!(accepted.declined);
        assert_eq!(accepted.answer.response, Response::Cards(vec![]));
    }

    #[test]
    fn test_duplicate_cards_rejected() {
        let choice = ChoiceRequest::select_cards(
            PlayerId::new(0),
            "Pick two",
            PlayerId::new(0),
            Zone::Hand,
            vec![CardId::new(1), CardId::new(2)],
            2,
            2,
        )
        .into_choice(ChoiceId(0));

        assert!(choice.check(&Response::Cards(vec![CardId::new(1), CardId::new(1)])).is_err());
        assert!(choice.check(&Response::Cards(vec![CardId::new(2), CardId::new(1)])).is_ok());
    }

    #[test]
    fn test_default_responses_are_valid() {
        let mandatory = cards_choice(false);
        assert_eq!(mandatory.default_response(), Response::Cards(vec![CardId::new(1)]));
        assert!(mandatory.check(&mandatory.default_response()).is_ok());

        let optional = cards_choice(true);
        assert_eq!(optional.default_response(), Response::Cards(vec![]));

        let color = ChoiceRequest::select_color(
            PlayerId::new(0),
            "Pick",
            vec![Color::Blue, Color::Red],
        )
            .into_choice(ChoiceId(1));
        assert_eq!(color.default_response(), Response::Color(Some(Color::Blue)));

        let player = ChoiceRequest::select_player(PlayerId::new(0), "Pick", vec![PlayerId::new(2)])
            .into_choice(ChoiceId(2));
        assert_eq!(player.default_response(), Response::Player(Some(PlayerId::new(2))));
    }

    #[test]
    fn test_unanswerable_mandatory_requests() {
        let p0 = PlayerId::new(0);

        assert!(ChoiceRequest::select_color(p0, "Pick", vec![]).check_answerable().is_err());
        assert!(ChoiceRequest::select_player(p0, "Pick", vec![]).check_answerable().is_err());

        let short = ChoiceRequest::select_cards(
            p0,
            "Pick two",
            p0,
            Zone::Hand,
            vec![CardId::new(1), CardId::new(1)],
            2,
            2,
        );
        assert!(short.check_answerable().is_err());

        let inverted =
            ChoiceRequest::select_cards(p0, "Pick", p0, Zone::Hand, vec![CardId::new(1)], 1, 0);
        assert!(inverted.clone().optional().check_answerable().is_err());
        assert!(inverted.check_answerable().is_err());
    }

    #[test]
    fn test_optional_empty_requests_are_answerable() {
        let p0 = PlayerId::new(0);

        let color = ChoiceRequest::select_color(p0, "Pick", vec![]).optional();
        assert!(color.check_answerable().is_ok());
        assert!(ChoiceRequest::yes_no(p0, "Go?").check_answerable().is_ok());
        assert!(ChoiceRequest::select_cards(p0, "Any", p0, Zone::Hand, vec![], 0, 1)
            .check_answerable()
            .is_ok());
    }

    #[test]
    fn test_default_response_skips_repeated_cards() {
        let choice = ChoiceRequest::select_cards(
            PlayerId::new(0),
            "Pick two",
            PlayerId::new(0),
            Zone::Hand,
            vec![CardId::new(1), CardId::new(1), CardId::new(2)],
            2,
            2,
        )
        .into_choice(ChoiceId(0));

        assert_eq!(
            choice.default_response(),
            Response::Cards(vec![CardId::new(1), CardId::new(2)]),
        );
        assert!(choice.check(&choice.default_response()).is_ok());
    }
}
