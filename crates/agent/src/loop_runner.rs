//! The loop drivers.
//!
//! Both drivers repeat [`StepExecutor::execute_step`] until the model
//! emits OUTPUT. They differ only in the iteration bound:
//!
//! - [`AgentLoop::run_unbounded`] keeps going until OUTPUT or an error.
//! - [`AgentLoop::run_bounded`] stops after a fixed number of steps and
//!   reports [`TurnOutcome::Exhausted`], which is not an error.
//!
//! A failing step ends the turn: one `AgentEvent::Error` is emitted and the
//! error is returned. Turns appended before the failure are kept.

use std::sync::Arc;

use stratus_core::error::StepError;
use stratus_core::message::Conversation;
use tracing::{debug, info, warn};

use crate::event::{AgentEvent, EventSink, NullSink};
use crate::executor::{StepExecutor, StepOutcome};

/// How a user turn ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model produced a final answer after `steps` steps.
    Answered { answer: String, steps: u32 },
    /// The step budget ran out with no final answer.
    Exhausted { steps: u32 },
}

impl TurnOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answered { answer, .. } => Some(answer),
            Self::Exhausted { .. } => None,
        }
    }

    pub fn steps(&self) -> u32 {
        match self {
            Self::Answered { steps, .. } | Self::Exhausted { steps } => *steps,
        }
    }
}

/// Drives the step executor for one user turn at a time.
pub struct AgentLoop {
    executor: StepExecutor,
    events: Arc<dyn EventSink>,
}

impl AgentLoop {
    pub fn new(executor: StepExecutor) -> Self {
        Self {
            executor,
            events: Arc::new(NullSink),
        }
    }

    /// Route progress events to `sink`.
    pub fn with_events(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Run until OUTPUT or a failed step. No iteration cap.
    pub async fn run_unbounded(
        &self,
        conversation: &mut Conversation,
    ) -> Result<TurnOutcome, StepError> {
        self.run(conversation, None).await
    }

    /// Run at most `max_steps` steps.
    pub async fn run_bounded(
        &self,
        conversation: &mut Conversation,
        max_steps: u32,
    ) -> Result<TurnOutcome, StepError> {
        self.run(conversation, Some(max_steps)).await
    }

    /// Run with an optional step cap; `None` is [`Self::run_unbounded`].
    pub async fn run(
        &self,
        conversation: &mut Conversation,
        max_steps: Option<u32>,
    ) -> Result<TurnOutcome, StepError> {
        info!(
            conversation_id = %conversation.id,
            turns = conversation.len(),
            max_steps = ?max_steps,
            "Processing turn"
        );

        let mut steps: u32 = 0;

        loop {
            if max_steps.is_some_and(|max| steps >= max) {
                warn!(
                    conversation_id = %conversation.id,
                    steps,
                    "Step budget exhausted without a final answer"
                );
                self.events.emit(AgentEvent::BudgetExhausted { steps });
                return Ok(TurnOutcome::Exhausted { steps });
            }

            steps += 1;
            debug!(conversation_id = %conversation.id, iteration = steps, "Agent loop iteration");

            match self
                .executor
                .execute_step(conversation, self.events.as_ref())
                .await
            {
                Ok(StepOutcome::Continue(_)) => {}
                Ok(StepOutcome::Finished { answer }) => {
                    info!(conversation_id = %conversation.id, steps, "Turn answered");
                    return Ok(TurnOutcome::Answered { answer, steps });
                }
                Err(e) => {
                    warn!(
                        conversation_id = %conversation.id,
                        iteration = steps,
                        error = %e,
                        "Step failed, aborting turn"
                    );
                    self.events.emit(AgentEvent::Error {
                        message: e.to_string(),
                    });
                    return Err(e);
                }
            }
        }
    }
}
