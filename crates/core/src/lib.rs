//! # Stratus Core
//!
//! Domain types, traits, and error definitions for the Stratus weather
//! agent. This crate has **no I/O** — it defines the step protocol, the
//! conversation log, and the seams (`Provider`, `Tool`) that the other
//! crates implement against.

pub mod error;
pub mod message;
pub mod provider;
pub mod step;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{ProviderError, StepError, ToolError};
pub use message::{Conversation, ConversationId, Role, Turn};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ResponseFormat, Usage};
pub use step::{AgentStep, Observation};
pub use tool::{Tool, ToolRegistry, ToolResult};
