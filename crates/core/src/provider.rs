//! Provider trait — the abstraction over completion endpoints.
//!
//! A Provider takes the system instruction plus the ordered turns of a
//! conversation and returns one text payload. The agent never looks past
//! that text; JSON mode is requested so the payload is a step object.
//!
//! Implementations: Gemini, OpenAI-compatible endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Turn;

/// Output format the endpoint is asked to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    #[default]
    Json,
}

/// One completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gemini-2.0-flash", "gpt-4o-mini")
    pub model: String,

    /// Fixed instruction sent alongside every call
    pub system_instruction: String,

    /// Conversation history, oldest first
    pub turns: Vec<Turn>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub response_format: ResponseFormat,
}

fn default_temperature() -> f32 {
    0.7
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The raw generated text
    pub text: String,

    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The step executor calls `complete()` once per step without knowing
/// which backend answers.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_to_json_mode() {
        let req: ProviderRequest = serde_json::from_value(serde_json::json!({
            "model": "gemini-2.0-flash",
            "system_instruction": "You are a Weather AI Agent.",
            "turns": [],
        }))
        .unwrap();
        assert_eq!(req.response_format, ResponseFormat::Json);
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.max_tokens.is_none());
    }

    #[test]
    fn request_serializes_turns() {
        let req = ProviderRequest {
            model: "m".into(),
            system_instruction: "sys".into(),
            turns: vec![Turn::user("Tokyo?")],
            temperature: default_temperature(),
            max_tokens: None,
            response_format: ResponseFormat::Json,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("Tokyo?"));
        assert!(json.contains(r#""response_format":"json""#));
        assert!(!json.contains("max_tokens"));
    }
}
