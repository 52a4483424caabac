//! The effect executor.
//!
//! Drives one effect activation from its first invocation to completion,
//! suspending whenever the effect asks a player something.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --start--> Running --NeedChoice--> AwaitingChoice --resume--> Running --Complete--> Idle
//!                    ^  |
//!                    +--+ Continue (bounded by max_continue_steps)
//! ```
//!
//! `Running` only exists inside a call: `start`, `resume` and
//! `resolve_timeout` always return with the snapshot either idle, awaiting
//! a choice, or ended.
//!
//! ## Per step
//!
//! 1. Invoke the effect function on the current snapshot.
//! 2. Commit the events it returned (ids must continue the log).
//! 3. Feed the committed events to every `EventConsumer`.
//! 4. Stop if the game ended.
//! 5. On `NeedChoice`, reject a request no answer could satisfy, so a
//!    suspended effect can always be resumed.
//!
//! ## Sharing
//!
//! A shared non-demand effect runs first for every opponent with at least
//! as many of the card's dogma icon as the activator, in turn order, then
//! for the activator. Sharers are fixed when the activation starts.

use std::time::Duration;

use log::debug;

use super::consumer::EventConsumer;
use super::context::{EffectContext, EffectKind, EffectResult};
use super::continuation::EffectContinuation;
use super::registry::{EffectDefinition, EffectRegistry};
use super::run::{Activation, EffectRun, SuspendedEffect};
use crate::cards::{CardDatabase, CardId};
use crate::choice::{Choice, ChoiceAnswer, ChoiceAnswerer, ChoiceId};
use crate::core::{EngineConfig, EngineError, EventKind, GameEvent, PlayerId, Snapshot};
use crate::icons::share_targets;
use crate::ops::Ops;

/// Executor state as read off a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutorState {
    /// Nothing running; an activation may start.
    Idle,
    /// An effect is suspended on this choice.
    AwaitingChoice { choice: ChoiceId, player: PlayerId },
    /// The game ended; nothing may start.
    GameOver,
}

/// Where a call to the executor left things.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// The effect finished for every participant.
    Complete {
        snapshot: Snapshot,
        card: CardId,
        index: usize,
        kind: EffectKind,
    },
    /// Waiting on `choice`. The snapshot carries the suspended effect.
    AwaitingChoice { snapshot: Snapshot, choice: Choice },
    /// A draw ended the game mid-effect.
    GameOver { snapshot: Snapshot },
}

impl ResolutionStatus {
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            ResolutionStatus::Complete { snapshot, .. }
            | ResolutionStatus::AwaitingChoice { snapshot, .. }
            | ResolutionStatus::GameOver { snapshot } => snapshot,
        }
    }

    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        match self {
            ResolutionStatus::Complete { snapshot, .. }
            | ResolutionStatus::AwaitingChoice { snapshot, .. }
            | ResolutionStatus::GameOver { snapshot } => snapshot,
        }
    }

    /// The outstanding choice, when awaiting one.
    #[must_use]
    pub fn pending_choice(&self) -> Option<&Choice> {
        match self {
            ResolutionStatus::AwaitingChoice { choice, .. } => Some(choice),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, ResolutionStatus::Complete { .. })
    }
}

/// Runs registered effects against snapshots.
pub struct Executor<'a> {
    registry: &'a EffectRegistry,
    db: &'a CardDatabase,
    config: &'a EngineConfig,
    consumers: Vec<Box<dyn EventConsumer + 'a>>,
}

impl<'a> Executor<'a> {
    #[must_use]
    pub fn new(
        registry: &'a EffectRegistry,
        db: &'a CardDatabase,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            registry,
            db,
            config,
            consumers: Vec::new(),
        }
    }

    /// Add an event consumer (builder pattern).
    #[must_use]
    pub fn with_consumer(mut self, consumer: impl EventConsumer + 'a) -> Self {
        self.consumers.push(Box::new(consumer));
        self
    }

    /// Executor state of a snapshot.
    #[must_use]
    pub fn state(snapshot: &Snapshot) -> ExecutorState {
        if snapshot.is_over() {
            return ExecutorState::GameOver;
        }
        match snapshot.pending_choice() {
            Some(choice) => ExecutorState::AwaitingChoice {
                choice: choice.id,
                player: choice.player,
            },
            None => ExecutorState::Idle,
        }
    }

    /// Start an activation. Advances the logical clock by one.
    pub fn start(
        &self,
        snapshot: &Snapshot,
        activation: Activation,
    ) -> Result<ResolutionStatus, EngineError> {
        if snapshot.is_over() {
            return Err(EngineError::GameOver);
        }
        if let Some(choice) = snapshot.pending_choice() {
            return Err(EngineError::ChoicePending {
                choice: choice.id,
                player: choice.player,
            });
        }
        if snapshot.player_count() != self.config.player_count {
            return Err(EngineError::PlayerCountMismatch {
                snapshot: snapshot.player_count(),
                config: self.config.player_count,
            });
        }
        snapshot.board(activation.activator)?;
        let definition = *self.registry.get(activation.card, activation.index)?;
        let card = self.db.get(activation.card)?;

        let mut players: Vec<PlayerId> = if definition.is_shared() {
            share_targets(snapshot, self.db, activation.activator, card.dogma_icon)?.into_vec()
        } else {
            Vec::new()
        };
        players.push(activation.activator);

        debug!(
            "{} activates {} effect {} ({:?}, sharers {:?})",
            activation.activator,
            activation.card,
            activation.index,
            definition.kind,
            &players[..players.len() - 1]
        );

        let run = EffectRun::new(activation, &players);
        let snapshot = self.begin_participant(&snapshot.tick(), &run)?;
        self.drive(snapshot, run, EffectContinuation::start(), None, definition)
    }

    /// Answer the pending choice and run until the next suspension or the
    /// end of the effect.
    ///
    /// A rejected answer leaves the caller's snapshot untouched, still
    /// awaiting the same choice.
    pub fn resume(
        &self,
        snapshot: &Snapshot,
        answer: ChoiceAnswer,
    ) -> Result<ResolutionStatus, EngineError> {
        if snapshot.is_over() {
            return Err(EngineError::GameOver);
        }
        let (snapshot, suspended) = snapshot.take_suspended().ok_or(EngineError::NoPendingChoice)?;
        let SuspendedEffect {
            run,
            continuation,
            choice,
        } = suspended;

        let accepted = choice.accept(answer)?;
        let definition = *self.registry.get(run.card, run.index)?;
        debug!(
            "{} answered {} for {} (declined: {})",
            choice.player, choice.id, run.card, accepted.declined
        );

        let snapshot = self.record(
            &snapshot,
            vec![EventKind::ChoiceAnswered {
                choice: choice.id,
                player: choice.player,
                declined: accepted.declined,
            }],
        )?;
        self.drive(snapshot, run, continuation, Some(accepted.answer), definition)
    }

    /// Answer the pending choice with its default once `elapsed` reaches
    /// the configured timeout.
    ///
    /// Returns `None` when no timeout is configured or it has not expired.
    pub fn resolve_timeout(
        &self,
        snapshot: &Snapshot,
        elapsed: Duration,
    ) -> Result<Option<ResolutionStatus>, EngineError> {
        let choice = snapshot.pending_choice().ok_or(EngineError::NoPendingChoice)?;
        let Some(timeout) = self.config.choice_timeout else {
            return Ok(None);
        };
        if elapsed < timeout {
            return Ok(None);
        }

        debug!("{} for {} timed out after {:?}", choice.id, choice.player, elapsed);
        let answer = ChoiceAnswer::to(choice, choice.default_response());
        let snapshot = self.record(
            snapshot,
            vec![EventKind::ChoiceTimedOut {
                choice: choice.id,
                player: choice.player,
            }],
        )?;
        self.resume(&snapshot, answer).map(Some)
    }

    /// Start an activation and answer every choice with `answerer` until
    /// the effect completes or the game ends.
    pub fn run_to_end<A>(
        &self,
        snapshot: &Snapshot,
        activation: Activation,
        answerer: &mut A,
    ) -> Result<ResolutionStatus, EngineError>
    where
        A: ChoiceAnswerer + ?Sized,
    {
        let mut status = self.start(snapshot, activation)?;
        while let ResolutionStatus::AwaitingChoice { snapshot, choice } = &status {
            let answer = answerer.answer(snapshot, choice);
            status = self.resume(snapshot, answer)?;
        }
        Ok(status)
    }

    fn drive(
        &self,
        mut snapshot: Snapshot,
        mut run: EffectRun,
        mut continuation: EffectContinuation,
        mut answer: Option<ChoiceAnswer>,
        definition: EffectDefinition,
    ) -> Result<ResolutionStatus, EngineError> {
        let ops = Ops::new(self.db, self.config);
        let mut continues = 0u32;

        loop {
            let ctx = EffectContext::new(&snapshot, ops, &run, definition.kind);
            let result = (definition.run)(&ctx, &continuation, answer.take().as_ref())?;

            match result {
                EffectResult::Complete { snapshot: next, events } => {
                    snapshot = self.commit(&next, events)?;
                    if snapshot.is_over() {
                        return Ok(self.game_over(snapshot, &run));
                    }
                    snapshot = self.record(
                        &snapshot,
                        vec![EventKind::EffectCompleted {
                            card: run.card,
                            index: run.index,
                            player: run.player,
                        }],
                    )?;

                    match run.advance() {
                        Some(next_run) => {
                            run = next_run;
                            snapshot = self.begin_participant(&snapshot, &run)?;
                            continuation = EffectContinuation::start();
                            continues = 0;
                        }
                        None => {
                            debug!("{} effect {} complete", definition.card, definition.index);
                            return Ok(ResolutionStatus::Complete {
                                snapshot,
                                card: definition.card,
                                index: definition.index,
                                kind: definition.kind,
                            });
                        }
                    }
                }
                EffectResult::NeedChoice {
                    snapshot: next,
                    events,
                    request,
                    next: resume_at,
                } => {
                    snapshot = self.commit(&next, events)?;
                    if snapshot.is_over() {
                        return Ok(self.game_over(snapshot, &run));
                    }
                    snapshot.board(request.player)?;
                    if let Err(reason) = request.check_answerable() {
                        return Err(EngineError::UnanswerableChoice {
                            card: run.card,
                            reason,
                        });
                    }
                    let choice = request.into_choice(snapshot.next_choice_id());
                    snapshot = self.record(
                        &snapshot,
                        vec![EventKind::ChoiceRequested {
                            choice: choice.id,
                            player: choice.player,
                        }],
                    )?;

                    debug!(
                        "{} effect {} suspended at step {} on {} for {}",
                        run.card,
                        run.index,
                        resume_at.step(),
                        choice.id,
                        choice.player
                    );
                    let snapshot = snapshot.suspend(SuspendedEffect {
                        run,
                        continuation: resume_at,
                        choice: choice.clone(),
                    });
                    return Ok(ResolutionStatus::AwaitingChoice { snapshot, choice });
                }
                EffectResult::Continue {
                    snapshot: next,
                    events,
                    next: resume_at,
                } => {
                    snapshot = self.commit(&next, events)?;
                    if snapshot.is_over() {
                        return Ok(self.game_over(snapshot, &run));
                    }
                    continues += 1;
                    if continues > self.config.max_continue_steps {
                        return Err(EngineError::RepeatLimit {
                            card: run.card,
                            limit: self.config.max_continue_steps,
                        });
                    }
                    continuation = resume_at;
                }
            }
        }
    }

    /// Mark the start of a sharer's run.
    fn begin_participant(
        &self,
        snapshot: &Snapshot,
        run: &EffectRun,
    ) -> Result<Snapshot, EngineError> {
        if run.player == run.activator {
            return Ok(snapshot.clone());
        }
        debug!("{} shares {} effect {}", run.player, run.card, run.index);
        self.record(
            snapshot,
            vec![EventKind::SharedEffect {
                player: run.player,
                activator: run.activator,
                card: run.card,
            }],
        )
    }

    fn game_over(&self, snapshot: Snapshot, run: &EffectRun) -> ResolutionStatus {
        debug!("game ended during {} effect {}", run.card, run.index);
        ResolutionStatus::GameOver { snapshot }
    }

    fn record(&self, snapshot: &Snapshot, kinds: Vec<EventKind>) -> Result<Snapshot, EngineError> {
        let mut sink = snapshot.event_sink();
        for kind in kinds {
            sink.emit(kind);
        }
        self.commit(snapshot, sink.into_events())
    }

    fn commit(&self, snapshot: &Snapshot, events: Vec<GameEvent>) -> Result<Snapshot, EngineError> {
        if self.consumers.is_empty() || events.is_empty() {
            return snapshot.commit(events);
        }
        let mut committed = snapshot.commit(events.clone())?;
        for consumer in &self.consumers {
            let extra = consumer.on_events(&committed, &events);
            if !extra.is_empty() {
                committed = committed.record(extra)?;
            }
        }
        Ok(committed)
    }
}
