//! One agent step: ask the model, validate, act, record.
//!
//! | Model step | Effect                                   | Turns appended          |
//! |------------|------------------------------------------|-------------------------|
//! | START      | progress notice                          | model step              |
//! | PLAN       | progress notice                          | model step              |
//! | TOOL       | resolve + run tool, report observation   | model step, observation |
//! | OUTPUT     | final answer                             | model step              |
//!
//! The model decides control flow; the executor only interprets the tag.
//! A response that fails validation appends nothing.

use std::sync::Arc;

use stratus_core::error::StepError;
use stratus_core::message::{Conversation, Turn};
use stratus_core::provider::{Provider, ProviderRequest, ResponseFormat};
use stratus_core::step::{AgentStep, Observation};
use stratus_core::tool::ToolRegistry;
use tracing::{debug, info};

use crate::event::{AgentEvent, EventSink};
use crate::prompt::system_prompt;

/// Shown when the model ends without putting anything in `CONTENT`.
pub const FALLBACK_ANSWER: &str =
    "I found the weather, but I couldn't summarize it. Please check the steps above.";

/// What a successful step means for the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// START, PLAN or TOOL: ask the model again.
    Continue(AgentStep),
    /// OUTPUT: the turn is over.
    Finished { answer: String },
}

pub struct StepExecutor {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
}

impl StepExecutor {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        let system_prompt = system_prompt(&tools);
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            tools,
            system_prompt,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max: Option<u32>) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one step against `conversation`.
    pub async fn execute_step(
        &self,
        conversation: &mut Conversation,
        events: &dyn EventSink,
    ) -> Result<StepOutcome, StepError> {
        let request = ProviderRequest {
            model: self.model.clone(),
            system_instruction: self.system_prompt.clone(),
            turns: conversation.turns().to_vec(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat::Json,
        };

        let response = self.provider.complete(request).await?;
        let step = AgentStep::parse(&response.text)?;

        debug!(
            conversation_id = %conversation.id,
            step = step.name(),
            content = step.content(),
            "Model step"
        );

        conversation.push(Turn::model(response.text));

        match &step {
            AgentStep::Start { content } => {
                events.emit(AgentEvent::Started {
                    content: content.clone(),
                });
            }
            AgentStep::Plan { content } => {
                events.emit(AgentEvent::Planning {
                    content: content.clone(),
                });
            }
            AgentStep::Tool { tool, input } => {
                events.emit(AgentEvent::ToolCall {
                    tool: tool.clone(),
                    input: input.clone(),
                });

                let handler = self.tools.resolve(tool)?;
                let result = handler.execute(input).await;
                info!(tool = %tool, success = result.success, "Tool executed");

                events.emit(AgentEvent::Observation {
                    tool: tool.clone(),
                    output: result.output.clone(),
                    success: result.success,
                });

                let observation = Observation::new(tool.as_str(), input.as_str(), result.output);
                conversation.push(Turn::user(observation.to_json()));
            }
            AgentStep::Output { content } => {
                let answer = content
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .unwrap_or(FALLBACK_ANSWER)
                    .to_string();

                events.emit(AgentEvent::FinalAnswer {
                    content: answer.clone(),
                });
                return Ok(StepOutcome::Finished { answer });
            }
        }

        Ok(StepOutcome::Continue(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{collect_events, registry, ScriptedProvider};
    use stratus_core::error::ProviderError;
    use stratus_core::message::Role;
    use tokio::sync::mpsc;

    fn executor(provider: Arc<ScriptedProvider>) -> StepExecutor {
        StepExecutor::new(provider, "mock-model", Arc::new(registry()))
    }

    fn conversation() -> Conversation {
        let mut conv = Conversation::new();
        conv.push(Turn::user("What is it like in Tokyo?"));
        conv
    }

    #[tokio::test]
    async fn start_appends_one_turn_and_continues() {
        let raw = r#"{"step":"START","CONTENT":"Let me check."}"#;
        let provider = Arc::new(ScriptedProvider::texts(&[raw]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut conv = conversation();

        let outcome = executor(provider).execute_step(&mut conv, &tx).await.unwrap();

        assert!(matches!(outcome, StepOutcome::Continue(AgentStep::Start { .. })));
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.turns()[1].role, Role::Model);
        assert_eq!(conv.turns()[1].content, raw);
        assert_eq!(
            collect_events(&mut rx),
            vec![AgentEvent::Started {
                content: Some("Let me check.".into())
            }]
        );
    }

    #[tokio::test]
    async fn plan_appends_one_turn_and_continues() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            r#"{"step":"PLAN","CONTENT":"Call get_weather"}"#,
        ]));
        let mut conv = conversation();

        let outcome = executor(provider)
            .execute_step(&mut conv, &crate::event::NullSink)
            .await
            .unwrap();

        assert!(matches!(outcome, StepOutcome::Continue(AgentStep::Plan { .. })));
        assert_eq!(conv.len(), 2);
    }

    #[tokio::test]
    async fn tool_appends_step_and_observation() {
        let raw = r#"{"step":"TOOL","tool":"get_weather","input":"Tokyo"}"#;
        let provider = Arc::new(ScriptedProvider::texts(&[raw]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut conv = conversation();

        let outcome = executor(provider).execute_step(&mut conv, &tx).await.unwrap();

        assert!(matches!(outcome, StepOutcome::Continue(AgentStep::Tool { .. })));
        assert_eq!(conv.len(), 3);
        assert_eq!(conv.turns()[1].content, raw);

        let observation = &conv.turns()[2];
        assert_eq!(observation.role, Role::User);
        let parsed: Observation = serde_json::from_str(&observation.content).unwrap();
        assert_eq!(parsed.tool, "get_weather");
        assert_eq!(parsed.input, "Tokyo");
        assert_eq!(parsed.output, "The weather in Tokyo is: Sunny +20°C");

        let events = collect_events(&mut rx);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "tool_call");
        assert_eq!(
            events[1],
            AgentEvent::Observation {
                tool: "get_weather".into(),
                output: "The weather in Tokyo is: Sunny +20°C".into(),
                success: true,
            }
        );
    }

    #[tokio::test]
    async fn unknown_tool_aborts_without_observation() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            r#"{"step":"TOOL","tool":"get_stock_price","input":"ACME"}"#,
        ]));
        let mut conv = conversation();

        let err = executor(provider)
            .execute_step(&mut conv, &crate::event::NullSink)
            .await
            .unwrap_err();

        assert!(matches!(err, StepError::UnknownTool(ref name) if name == "get_stock_price"));
        // Model step recorded, no observation
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.turns().last().map(|t| t.role), Some(Role::Model));
    }

    #[tokio::test]
    async fn output_finishes_with_content() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            r#"{"step":"OUTPUT","CONTENT":"It is sunny and 20°C in Tokyo."}"#,
        ]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut conv = conversation();

        let outcome = executor(provider).execute_step(&mut conv, &tx).await.unwrap();

        assert_eq!(
            outcome,
            StepOutcome::Finished {
                answer: "It is sunny and 20°C in Tokyo.".into()
            }
        );
        assert_eq!(conv.len(), 2);
        assert_eq!(collect_events(&mut rx)[0].event_type(), "final_answer");
    }

    #[tokio::test]
    async fn empty_output_falls_back() {
        for raw in [
            r#"{"step":"OUTPUT"}"#,
            r#"{"step":"OUTPUT","CONTENT":null}"#,
            r#"{"step":"OUTPUT","CONTENT":"   "}"#,
        ] {
            let provider = Arc::new(ScriptedProvider::texts(&[raw]));
            let mut conv = conversation();
            let outcome = executor(provider)
                .execute_step(&mut conv, &crate::event::NullSink)
                .await
                .unwrap();
            assert_eq!(
                outcome,
                StepOutcome::Finished {
                    answer: FALLBACK_ANSWER.into()
                }
            );
            assert_eq!(conv.len(), 2);
        }
    }

    #[tokio::test]
    async fn malformed_response_appends_nothing() {
        let provider = Arc::new(ScriptedProvider::texts(&["I think it's sunny!"]));
        let mut conv = conversation();

        let err = executor(provider)
            .execute_step(&mut conv, &crate::event::NullSink)
            .await
            .unwrap_err();

        assert!(matches!(err, StepError::MalformedResponse { .. }));
        assert_eq!(conv.len(), 1);
    }

    #[tokio::test]
    async fn transport_error_is_step_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(ProviderError::Network(
            "connection reset".into(),
        ))]));
        let mut conv = conversation();

        let err = executor(provider)
            .execute_step(&mut conv, &crate::event::NullSink)
            .await
            .unwrap_err();

        assert!(matches!(err, StepError::Transport(ProviderError::Network(_))));
        assert_eq!(conv.len(), 1);
    }

    #[tokio::test]
    async fn request_carries_history_and_json_mode() {
        let provider = Arc::new(ScriptedProvider::texts(&[r#"{"step":"START"}"#]));
        let exec = executor(provider.clone())
            .with_temperature(0.1)
            .with_max_tokens(Some(128));
        let mut conv = conversation();

        exec.execute_step(&mut conv, &crate::event::NullSink).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.model, "mock-model");
        assert_eq!(req.turns.len(), 1);
        assert_eq!(req.turns[0].content, "What is it like in Tokyo?");
        assert_eq!(req.response_format, ResponseFormat::Json);
        assert_eq!(req.max_tokens, Some(128));
        assert!(req.system_instruction.contains("get_weather"));
    }

    #[tokio::test]
    async fn fenced_response_is_accepted_and_stored_raw() {
        let raw = "```json\n{\"step\":\"PLAN\",\"CONTENT\":\"fenced\"}\n```";
        let provider = Arc::new(ScriptedProvider::texts(&[raw]));
        let mut conv = conversation();

        executor(provider)
            .execute_step(&mut conv, &crate::event::NullSink)
            .await
            .unwrap();

        assert_eq!(conv.turns()[1].content, raw);
    }
}
