//! `stratus ask` — One question, every step printed as it happens.

use std::io::Write;
use std::sync::Arc;

use stratus_agent::{AgentEvent, AgentLoop, EventSink};
use stratus_core::message::{Conversation, Turn};
use tokio::io::{self, AsyncBufReadExt, BufReader};

/// Prints each event on its own line, the way the console loop reports
/// progress.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn render(event: &AgentEvent) -> Option<String> {
        match event {
            AgentEvent::Started { content } => {
                Some(format!("AI: {}", content.as_deref().unwrap_or_default()))
            }
            AgentEvent::Planning { content } => {
                Some(format!("Planning: {}", content.as_deref().unwrap_or_default()))
            }
            AgentEvent::ToolCall { .. } => None,
            AgentEvent::Observation { output, .. } => Some(format!("Tool result: {output}")),
            AgentEvent::FinalAnswer { content } => Some(format!("Final Output: {content}")),
            AgentEvent::BudgetExhausted { steps } => Some(format!(
                "Stopped after {steps} steps without a final answer."
            )),
            AgentEvent::Error { message } => Some(format!("An error occurred: {message}")),
        }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: AgentEvent) {
        if let Some(line) = Self::render(&event) {
            println!("{line}");
        }
    }
}

pub async fn run(
    query: Option<String>,
    max_steps: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, executor) = super::build_executor()?;

    let query = match query {
        Some(q) => q,
        None => match read_query().await? {
            Some(q) => q,
            None => return Ok(()),
        },
    };

    let agent = AgentLoop::new(executor).with_events(Arc::new(ConsoleSink));
    let mut conv = Conversation::new();
    conv.push(Turn::user(query));

    let limit = max_steps.or(config.agent.console_step_limit);
    // Failures are already reported through the sink
    if let Ok(outcome) = agent.run(&mut conv, limit).await {
        tracing::debug!(
            steps = outcome.steps(),
            answered = outcome.answer().is_some(),
            "Console run finished"
        );
    }

    Ok(())
}

/// Prompt on stdout and read one line. `None` on EOF or a blank line.
async fn read_query() -> Result<Option<String>, Box<dyn std::error::Error>> {
    print!("Ask about weather: ");
    std::io::stdout().flush()?;

    let mut lines = BufReader::new(io::stdin()).lines();
    let line = lines.next_line().await?;
    Ok(line
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty()))
}
