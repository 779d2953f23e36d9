//! Tool trait — the abstraction over agent capabilities.
//!
//! A tool takes one text argument and always produces a text observation.
//! Failures of the outside world (HTTP errors, unreachable hosts) are
//! reported inside that text, never as an `Err`, so the agent can feed
//! every outcome back to the model the same way.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ToolError;

/// The result of a tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the external lookup succeeded
    pub success: bool,

    /// Human-readable observation text
    pub output: String,
}

impl ToolResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// The core Tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name the model uses to call this tool (e.g., "get_weather").
    fn name(&self) -> &str;

    /// What the tool does (rendered into the system prompt).
    fn description(&self) -> &str;

    /// Placeholder for the `input` argument shown to the model.
    fn input_hint(&self) -> &str {
        "input"
    }

    /// Run the tool. Never fails; see the module docs.
    async fn execute(&self, input: &str) -> ToolResult;
}

/// Name → tool mapping.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// after construction.
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Builder-style registration.
    pub fn with(mut self, tool: Box<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Result<&dyn Tool, ToolError> {
        self.tools
            .get(name)
            .map(|t| t.as_ref())
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// All registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// One line per tool for the system prompt:
    /// `- get_weather(city_name): Look up ...`
    pub fn descriptions(&self) -> String {
        self.tools
            .values()
            .map(|t| format!("- {}({}): {}", t.name(), t.input_hint(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        fn input_hint(&self) -> &str {
            "text"
        }
        async fn execute(&self, input: &str) -> ToolResult {
            ToolResult::ok(input)
        }
    }

    #[test]
    fn registry_register_and_resolve() {
        let registry = ToolRegistry::new().with(Box::new(EchoTool));
        assert!(registry.resolve("echo").is_ok());
        assert_eq!(
            registry.resolve("nonexistent").err(),
            Some(ToolError::UnknownTool("nonexistent".into()))
        );
    }

    #[test]
    fn registry_descriptions() {
        let registry = ToolRegistry::new().with(Box::new(EchoTool));
        assert_eq!(registry.descriptions(), "- echo(text): Echoes back the input");
        assert_eq!(registry.names(), vec!["echo"]);
    }

    #[tokio::test]
    async fn resolved_tool_executes() {
        let registry = ToolRegistry::new().with(Box::new(EchoTool));
        let tool = registry.resolve("echo").unwrap();
        let result = tool.execute("hello world").await;
        assert!(result.success);
        assert_eq!(result.output, "hello world");
    }

    #[test]
    fn empty_registry() {
        let registry = ToolRegistry::default();
        assert!(registry.names().is_empty());
        assert!(registry.descriptions().is_empty());
    }
}
