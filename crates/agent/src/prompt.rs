//! System instruction sent with every completion request.

use stratus_core::tool::ToolRegistry;

/// Build the system instruction describing the step protocol and the
/// registered tools.
pub fn system_prompt(tools: &ToolRegistry) -> String {
    let example = tools
        .names()
        .first()
        .and_then(|name| tools.resolve(name).ok())
        .map(|t| {
            format!(
                "- If a TOOL call is needed, return: {{\"step\":\"TOOL\",\"tool\":\"{}\",\"input\":\"{}\"}}\n",
                t.name(),
                t.input_hint()
            )
        })
        .unwrap_or_default();

    format!(
        r#"You are a Weather AI Agent.
Your job is to answer user queries using the following workflow: START -> PLAN -> TOOL -> OUTPUT.

Available tools:
{tools}

Rules:
- Output must be ONLY in JSON format.
- Only one step per response: START or PLAN or TOOL or OUTPUT.
{example}- After a TOOL step you will receive {{"step":"OBSERVE","tool":"...","input":"...","OUTPUT":"..."}} with the tool result; respond with PLAN or OUTPUT.
- When step is "OUTPUT", you MUST put the final answer text in the "CONTENT" field. Do not leave it null.

JSON Format:
{{"step":"START"|"PLAN"|"TOOL"|"OUTPUT","CONTENT":"string","tool":"string","input":"string"}}
"#,
        tools = tools.descriptions(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use stratus_core::tool::{Tool, ToolResult};

    struct FakeWeather;

    #[async_trait]
    impl Tool for FakeWeather {
        fn name(&self) -> &str {
            "get_weather"
        }
        fn description(&self) -> &str {
            "Current weather for a city."
        }
        fn input_hint(&self) -> &str {
            "city_name"
        }
        async fn execute(&self, _input: &str) -> ToolResult {
            ToolResult::ok("")
        }
    }

    #[test]
    fn prompt_lists_tools_and_protocol() {
        let tools = ToolRegistry::new().with(Box::new(FakeWeather));
        let prompt = system_prompt(&tools);

        assert!(prompt.starts_with("You are a Weather AI Agent."));
        assert!(prompt.contains("- get_weather(city_name): Current weather for a city."));
        assert!(prompt.contains(r#"{"step":"TOOL","tool":"get_weather","input":"city_name"}"#));
        assert!(prompt.contains(r#""step":"OBSERVE""#));
        assert!(prompt.contains(r#""CONTENT" field"#));
    }

    #[test]
    fn prompt_without_tools_has_no_tool_example() {
        let prompt = system_prompt(&ToolRegistry::new());
        assert!(!prompt.contains("If a TOOL call is needed"));
    }
}
