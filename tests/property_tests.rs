//! Property-based tests over random activation sequences.
//!
//! Every sequence plays the sample set from a shuffled opening, answering
//! choices with a seeded `RandomAnswerer`. A sequence stops early when the
//! game ends or the supply runs dry.

use proptest::prelude::*;

use dogma_engine::cards::{CardId, Icon, IconSlot};
use dogma_engine::choice::{ChoiceAnswerer, RandomAnswerer};
use dogma_engine::core::{EngineError, PlayerId, Snapshot};
use dogma_engine::effects::{Activation, Executor, ExecutorState, ResolutionStatus};
use dogma_engine::games::sample::{SampleGame, SampleGameBuilder};
use dogma_engine::icons::counting::stack_counts;
use dogma_engine::icons::visibility::slots_for;
use dogma_engine::zones::SplayDirection;

/// Every registered `(card, effect index)` pair, in id order.
fn activatable(game: &SampleGame) -> Vec<(CardId, usize)> {
    game.db()
        .ids()
        .into_iter()
        .flat_map(|card| {
            game.registry()
                .effects_for(card)
                .into_iter()
                .map(|definition| (definition.card, definition.index))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn fail(err: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}

/// Every snapshot seen along the way, plus the final one.
struct Playthrough {
    seen: Vec<Snapshot>,
    last: Snapshot,
}

fn play(
    game: &SampleGame,
    seed: u64,
    plan: &[(usize, u8)],
    persist: bool,
) -> Result<Playthrough, TestCaseError> {
    let exec = game.executor();
    let effects = activatable(game);
    let players = game.config().player_count;
    let mut answerer = RandomAnswerer::new(seed);
    let mut snapshot = game.opening(seed);
    let mut seen = vec![snapshot.clone()];
    let mut last_choice = None;

    'plan: for &(pick, seat) in plan {
        let (card, index) = effects[pick % effects.len()];
        let activator = PlayerId::new(seat % players as u8);
        let mut status = match exec.start(&snapshot, Activation::new(card, index, activator)) {
            Ok(status) => status,
            Err(EngineError::SupplyExhausted { .. }) => break,
            Err(err) => return Err(fail(format!("{card} effect {index}: {err}"))),
        };

        loop {
            seen.push(status.snapshot().clone());
            match status {
                ResolutionStatus::AwaitingChoice { snapshot: waiting, choice } => {
                    prop_assert_eq!(
                        Executor::state(&waiting),
                        ExecutorState::AwaitingChoice { choice: choice.id, player: choice.player }
                    );
                    if let Some(previous) = last_choice {
                        prop_assert!(choice.id > previous);
                    }
                    last_choice = Some(choice.id);

                    let waiting = if persist {
                        let bytes = waiting.to_bytes().map_err(fail)?;
                        Snapshot::from_bytes(&bytes).map_err(fail)?
                    } else {
                        waiting
                    };
                    let answer = answerer.answer(&waiting, &choice);
                    status = match exec.resume(&waiting, answer) {
                        Ok(status) => status,
                        Err(EngineError::SupplyExhausted { .. }) => {
                            snapshot = waiting;
                            break 'plan;
                        }
                        Err(err) => return Err(fail(format!("{card} effect {index}: {err}"))),
                    };
                }
                ResolutionStatus::Complete { snapshot: done, .. } => {
                    prop_assert_eq!(Executor::state(&done), ExecutorState::Idle);
                    snapshot = done;
                    break;
                }
                ResolutionStatus::GameOver { snapshot: over } => {
                    prop_assert_eq!(Executor::state(&over), ExecutorState::GameOver);
                    prop_assert!(matches!(
                        exec.start(&over, Activation::new(card, index, activator)),
                        Err(EngineError::GameOver)
                    ));
                    snapshot = over;
                    break 'plan;
                }
            }
        }
    }

    Ok(Playthrough { seen, last: snapshot })
}

fn plans() -> impl Strategy<Value = Vec<(usize, u8)>> {
    prop::collection::vec((0usize..64, 0u8..4), 1..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every card is in exactly one place in every reachable snapshot.
    #[test]
    fn prop_cards_conserved(seed in any::<u64>(), players in 1usize..=4, plan in plans()) {
        let game = SampleGameBuilder::new().player_count(players).build().unwrap();
        let run = play(&game, seed, &plan, false)?;

        for snapshot in &run.seen {
            let census = snapshot.card_census();
            prop_assert_eq!(census.len(), game.db().len());
            prop_assert!(census.values().all(|&n| n == 1));
        }
    }

    /// Event ids run 0, 1, 2, ... with no gaps or reuse.
    #[test]
    fn prop_event_ids_increase(seed in any::<u64>(), players in 1usize..=4, plan in plans()) {
        let game = SampleGameBuilder::new().player_count(players).build().unwrap();
        let run = play(&game, seed, &plan, false)?;

        let ids: Vec<u64> = run.last.events().map(|e| e.id.0).collect();
        prop_assert_eq!(ids.clone(), (0..ids.len() as u64).collect::<Vec<_>>());
        prop_assert_eq!(run.last.next_event_id(), ids.len() as u64);
    }

    /// A stack with fewer than two cards is never splayed.
    #[test]
    fn prop_short_stacks_unsplayed(seed in any::<u64>(), players in 1usize..=4, plan in plans()) {
        let game = SampleGameBuilder::new().player_count(players).build().unwrap();
        let run = play(&game, seed, &plan, false)?;

        for snapshot in &run.seen {
            for (_, board) in snapshot.boards() {
                for stack in board.stacks() {
                    prop_assert!(!stack.is_empty());
                    if stack.len() < 2 {
                        prop_assert_eq!(stack.splay(), SplayDirection::None);
                    }
                }
            }
        }
    }

    /// An unsplayed stack shows its top card's top slot; a splayed one
    /// shows the same slot set on every card.
    #[test]
    fn prop_visibility_law(seed in any::<u64>(), players in 1usize..=4, plan in plans()) {
        let game = SampleGameBuilder::new().player_count(players).build().unwrap();
        let run = play(&game, seed, &plan, false)?;

        for (_, board) in run.last.boards() {
            for stack in board.stacks() {
                let slots: &[IconSlot] = if stack.len() < 2 {
                    &[IconSlot::Top]
                } else {
                    slots_for(stack.splay())
                };
                let shown: Vec<CardId> = match stack.splay() {
                    SplayDirection::None => stack.top().into_iter().collect(),
                    _ => stack.cards().collect(),
                };
                let counts = stack_counts(stack, game.db()).unwrap();
                for icon in Icon::ALL {
                    let expected = shown
                        .iter()
                        .map(|&id| {
                            let card = game.db().get(id).unwrap();
                            let hits = slots.iter().filter(|&&slot| card.icon(slot) == Some(icon));
                            hits.count() as u32
                        })
                        .sum::<u32>();
                    prop_assert_eq!(counts.get(icon), expected);
                }
            }
        }
    }

    /// Same seed and plan, same log. Saving and reloading at every
    /// suspension changes nothing.
    #[test]
    fn prop_replay_and_persistence_deterministic(
        seed in any::<u64>(),
        players in 1usize..=4,
        plan in plans(),
    ) {
        let game = SampleGameBuilder::new().player_count(players).build().unwrap();
        let first = play(&game, seed, &plan, false)?;
        let second = play(&game, seed, &plan, false)?;
        let persisted = play(&game, seed, &plan, true)?;

        prop_assert_eq!(&first.last, &second.last);
        prop_assert_eq!(&first.last, &persisted.last);
    }
}
