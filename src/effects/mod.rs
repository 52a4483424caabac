//! Resumable dogma effects.
//!
//! Card text is encoded as effect functions: plain `fn`s that take an
//! `EffectContext`, an `EffectContinuation` and, on resume, the validated
//! `ChoiceAnswer`, and return an `EffectResult`. The `Executor` drives them,
//! storing the continuation on the snapshot whenever an effect asks a
//! player something.
//!
//! ## Writing an Effect
//!
//! ```
//! use dogma_engine::cards::Age;
//! use dogma_engine::choice::ChoiceAnswer;
//! use dogma_engine::core::EngineError;
//! use dogma_engine::effects::{EffectContext, EffectContinuation, EffectResult};
//!
//! /// "Draw a 2."
//! fn draw_a_two(
//!     ctx: &EffectContext<'_>,
//!     continuation: &EffectContinuation,
//!     _answer: Option<&ChoiceAnswer>,
//! ) -> Result<EffectResult, EngineError> {
//!     if continuation.step() != 0 {
//!         return Err(continuation.unknown_step(ctx.card()));
//!     }
//!     let mut events = ctx.event_sink();
//!     let drawn = ctx.ops().draw(ctx.snapshot(), ctx.player(), Age::new(2), &mut events)?;
//!     Ok(EffectResult::complete(drawn.snapshot, events))
//! }
//! ```

mod consumer;
mod context;
mod continuation;
mod executor;
mod registry;
mod run;

pub use consumer::EventConsumer;
pub use context::{EffectContext, EffectKind, EffectResult};
pub use continuation::{EffectContinuation, Value};
pub use executor::{Executor, ExecutorState, ResolutionStatus};
pub use registry::{EffectDefinition, EffectFn, EffectRegistry};
pub use run::{Activation, EffectRun, SuspendedEffect};
