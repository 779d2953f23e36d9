//! Error types for the Stratus domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; `StepError` is what a
//! single agent step can fail with and is the only error the loop drivers
//! ever surface.

use thiserror::Error;

/// Failures talking to the completion endpoint.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider returned no text: {0}")]
    EmptyResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Why a single agent step was aborted.
///
/// Any of these terminates the current user turn. Turns appended before
/// the failure stay in the conversation.
#[derive(Debug, Clone, Error)]
pub enum StepError {
    #[error("Completion endpoint unreachable: {0}")]
    Transport(#[from] ProviderError),

    #[error("Malformed model response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Model requested unknown tool '{0}'")]
    UnknownTool(String),
}

impl StepError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}

impl From<ToolError> for StepError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::UnknownTool(name) => Self::UnknownTool(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = StepError::from(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn unknown_tool_maps_to_step_error() {
        let err: StepError = ToolError::UnknownTool("get_stock".into()).into();
        assert!(matches!(err, StepError::UnknownTool(ref name) if name == "get_stock"));
        assert!(err.to_string().contains("get_stock"));
    }

    #[test]
    fn malformed_carries_reason() {
        let err = StepError::malformed("missing field `tool`");
        assert!(err.to_string().contains("missing field `tool`"));
    }
}
