//! Agent step protocol — what the model says it wants to do next.
//!
//! Every completion is a single JSON object tagged by `step`:
//!
//! ```json
//! {"step":"START"|"PLAN"|"TOOL"|"OUTPUT","CONTENT":"...","tool":"...","input":"..."}
//! ```
//!
//! The tag decides which of the other fields are meaningful, so the parsed
//! form is an enum whose variants carry only those fields. After a TOOL
//! step the agent answers with an [`Observation`] tagged `OBSERVE`.

use serde::{Deserialize, Serialize};

use crate::error::StepError;

/// One validated step returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "UPPERCASE")]
pub enum AgentStep {
    /// The model acknowledges the query.
    Start {
        #[serde(
            rename = "CONTENT",
            alias = "content",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        content: Option<String>,
    },

    /// The model reasons about what to do next.
    Plan {
        #[serde(
            rename = "CONTENT",
            alias = "content",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        content: Option<String>,
    },

    /// The model asks for a tool call.
    Tool { tool: String, input: String },

    /// The model's final answer.
    Output {
        #[serde(
            rename = "CONTENT",
            alias = "content",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        content: Option<String>,
    },
}

impl AgentStep {
    /// Parse and validate a raw completion.
    ///
    /// Markdown code fences some backends wrap JSON in are stripped first.
    pub fn parse(raw: &str) -> Result<Self, StepError> {
        let payload = strip_fences(raw);
        if payload.is_empty() {
            return Err(StepError::malformed("empty response"));
        }

        let step: Self =
            serde_json::from_str(payload).map_err(|e| StepError::malformed(e.to_string()))?;

        if let Self::Tool { tool, .. } = &step {
            if tool.trim().is_empty() {
                return Err(StepError::malformed("TOOL step with blank tool name"));
            }
        }

        Ok(step)
    }

    /// The wire tag of this step.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "START",
            Self::Plan { .. } => "PLAN",
            Self::Tool { .. } => "TOOL",
            Self::Output { .. } => "OUTPUT",
        }
    }

    /// Free-text content, if the variant carries any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Start { content } | Self::Plan { content } | Self::Output { content } => {
                content.as_deref()
            }
            Self::Tool { .. } => None,
        }
    }
}

/// Remove a surrounding ```` ```json ```` / ```` ``` ```` fence, if present.
fn strip_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    for opener in ["```json", "```JSON", "```"] {
        if let Some(rest) = s.strip_prefix(opener) {
            s = rest;
            break;
        }
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum ObserveTag {
    #[default]
    #[serde(rename = "OBSERVE")]
    Observe,
}

/// The result of a tool call, fed back to the model as a user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    step: ObserveTag,
    pub tool: String,
    pub input: String,
    #[serde(rename = "OUTPUT")]
    pub output: String,
}

impl Observation {
    pub fn new(
        tool: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            step: ObserveTag::Observe,
            tool: tool.into(),
            input: input.into(),
            output: output.into(),
        }
    }

    /// Encode as `{"step":"OBSERVE","tool":..,"input":..,"OUTPUT":..}`.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "step": "OBSERVE",
            "tool": self.tool,
            "input": self.input,
            "OUTPUT": self.output,
        })
        .to_string()
    }
}
