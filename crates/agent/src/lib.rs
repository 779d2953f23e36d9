//! The step-protocol agent loop.
//!
//! Every model response is exactly one step:
//!
//! 1. **START** acknowledges the query
//! 2. **PLAN** reasons about what to do next
//! 3. **TOOL** asks for a tool call; the result comes back as an OBSERVE turn
//! 4. **OUTPUT** carries the final answer and ends the turn
//!
//! The model decides the order. [`StepExecutor`] interprets one step,
//! [`AgentLoop`] repeats it, and [`ChatSession`] carries answers across
//! user turns.

pub mod event;
pub mod executor;
pub mod loop_runner;
pub mod prompt;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use event::{AgentEvent, EventSink, NullSink};
pub use executor::{FALLBACK_ANSWER, StepExecutor, StepOutcome};
pub use loop_runner::{AgentLoop, TurnOutcome};
pub use prompt::system_prompt;
pub use session::ChatSession;
