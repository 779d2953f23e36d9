//! Progress events emitted while a turn runs.
//!
//! The loop itself never prints. Each front end (console, chat REPL, tests)
//! supplies an [`EventSink`] and renders events its own way.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Something the user should see while the agent works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// The model acknowledged the query (START).
    Started { content: Option<String> },

    /// The model is reasoning (PLAN).
    Planning { content: Option<String> },

    /// The model asked for a tool call (TOOL).
    ToolCall { tool: String, input: String },

    /// A tool produced its observation.
    Observation {
        tool: String,
        output: String,
        success: bool,
    },

    /// The model produced the final answer (OUTPUT).
    FinalAnswer { content: String },

    /// The step budget ran out before a final answer.
    BudgetExhausted { steps: u32 },

    /// The turn was aborted.
    Error { message: String },
}

impl AgentEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Planning { .. } => "planning",
            Self::ToolCall { .. } => "tool_call",
            Self::Observation { .. } => "observation",
            Self::FinalAnswer { .. } => "final_answer",
            Self::BudgetExhausted { .. } => "budget_exhausted",
            Self::Error { .. } => "error",
        }
    }
}

/// Receives progress events. Called synchronously, in order.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AgentEvent);
}

/// Discards everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: AgentEvent) {}
}

impl EventSink for mpsc::UnboundedSender<AgentEvent> {
    fn emit(&self, event: AgentEvent) {
        // receiver gone means nobody is watching
        if let Err(mpsc::error::SendError(event)) = self.send(event) {
            tracing::trace!(event = event.event_type(), "Event dropped, no receiver");
        }
    }
}
