//! Shared test helpers for executor and loop tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use stratus_core::error::ProviderError;
use stratus_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use stratus_core::tool::{Tool, ToolRegistry, ToolResult};
use tokio::sync::mpsc;

use crate::event::AgentEvent;

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next scripted result. With a
/// repeated response set, that response is returned once the script runs
/// out; otherwise running out panics.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    repeat: Option<String>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    /// Returns `text` on every call.
    pub fn repeating(text: &str) -> Self {
        Self {
            repeat: Some(text.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };

        let next = self.script.lock().unwrap().pop_front();
        let text = match (next, &self.repeat) {
            (Some(result), _) => result?,
            (None, Some(text)) => text.clone(),
            (None, None) => panic!("ScriptedProvider: no more responses (call #{call})"),
        };

        Ok(ProviderResponse {
            text,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: "mock-model".into(),
        })
    }
}

/// Weather stand-in that always reports sunshine.
pub struct SunnyWeather;

#[async_trait]
impl Tool for SunnyWeather {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Current weather for a city."
    }

    fn input_hint(&self) -> &str {
        "city_name"
    }

    async fn execute(&self, input: &str) -> ToolResult {
        ToolResult::ok(format!("The weather in {input} is: Sunny +20°C"))
    }
}

pub fn registry() -> ToolRegistry {
    ToolRegistry::new().with(Box::new(SunnyWeather))
}

/// Drain everything currently queued on `rx`.
pub fn collect_events(rx: &mut mpsc::UnboundedReceiver<AgentEvent>) -> Vec<AgentEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
