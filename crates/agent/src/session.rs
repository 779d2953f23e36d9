//! Multi-turn chat state.
//!
//! A [`ChatSession`] keeps only what the user asked and what the agent
//! answered. Each new query runs in a fresh [`Conversation`] seeded with
//! that transcript, so intermediate steps from earlier turns never reach
//! the model again.

use stratus_core::error::StepError;
use stratus_core::message::{Conversation, ConversationId, Turn};
use tracing::debug;

use crate::loop_runner::{AgentLoop, TurnOutcome};

pub struct ChatSession {
    id: ConversationId,
    transcript: Vec<Turn>,
    max_steps: Option<u32>,
}

impl ChatSession {
    /// `max_steps` bounds every turn; `None` lets each run until OUTPUT.
    pub fn new(max_steps: Option<u32>) -> Self {
        Self {
            id: ConversationId::new(),
            transcript: Vec::new(),
            max_steps,
        }
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Forget every previous exchange.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.id = ConversationId::new();
    }

    /// Run one user query through `agent`.
    ///
    /// The query is kept in the transcript whatever happens. Only a final
    /// answer is added after it.
    pub async fn submit(
        &mut self,
        agent: &AgentLoop,
        query: &str,
    ) -> Result<TurnOutcome, StepError> {
        self.transcript.push(Turn::user(query));

        let mut conversation = Conversation::new();
        conversation.id = self.id.clone();
        for turn in &self.transcript {
            conversation.push(turn.clone());
        }
        debug!(
            conversation_id = %self.id,
            replayed = self.transcript.len(),
            "Starting chat turn"
        );

        let outcome = agent.run(&mut conversation, self.max_steps).await?;
        if let TurnOutcome::Answered { answer, .. } = &outcome {
            self.transcript.push(Turn::model(answer.clone()));
        }
        Ok(outcome)
    }
}
