//! `stratus chat` — Interactive session mode.

use std::io::Write;
use std::sync::Arc;

use stratus_agent::{AgentEvent, AgentLoop, ChatSession, EventSink, TurnOutcome};
use tokio::io::{self, AsyncBufReadExt, BufReader};

/// Status lines shown while a chat turn runs. The answer itself is printed
/// by the REPL once the turn ends.
pub struct StatusSink;

impl StatusSink {
    pub fn render(event: &AgentEvent) -> Option<String> {
        match event {
            AgentEvent::Started { content } => Some(format!(
                "  Start: {}",
                content.as_deref().unwrap_or_default()
            )),
            AgentEvent::Planning { content } => Some(format!(
                "  Plan: {}",
                content.as_deref().unwrap_or_default()
            )),
            AgentEvent::ToolCall { tool, input } => {
                Some(format!("  Tool: calling `{tool}` for `{input}`..."))
            }
            AgentEvent::Observation { output, .. } => Some(format!("  Observation: {output}")),
            AgentEvent::FinalAnswer { .. } => Some("  Finished!".to_string()),
            AgentEvent::BudgetExhausted { steps } => Some(format!(
                "  No answer after {steps} steps. Try rephrasing the question."
            )),
            AgentEvent::Error { message } => Some(format!("  An error occurred: {message}")),
        }
    }
}

impl EventSink for StatusSink {
    fn emit(&self, event: AgentEvent) {
        if let Some(line) = Self::render(&event) {
            println!("{line}");
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, executor) = super::build_executor()?;
    let model = executor.model().to_string();

    let agent = AgentLoop::new(executor).with_events(Arc::new(StatusSink));
    let mut session = ChatSession::new(Some(config.agent.max_steps_per_turn));

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        Stratus Weather Agent — Chat          ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {model}");
    println!("  Steps:     {} per question", config.agent.max_steps_per_turn);
    println!();
    println!("  Ask about the weather (e.g. 'What is it like in Tokyo?').");
    println!("  Type '/reset' to forget the conversation, 'exit' to quit.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }
        if line == "/reset" {
            tracing::debug!(session = %session.id(), "Resetting chat session");
            session.reset();
            println!("  Conversation cleared.");
            println!();
            continue;
        }

        match session.submit(&agent, line).await {
            Ok(TurnOutcome::Answered { answer, .. }) => {
                println!();
                for text in answer.lines() {
                    println!("  Assistant > {text}");
                }
                println!();
            }
            Ok(TurnOutcome::Exhausted { .. }) | Err(_) => {
                // Reported by the status sink
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}
