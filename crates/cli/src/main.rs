//! Stratus CLI — the main entry point.
//!
//! Commands:
//! - `ask`      — One weather question, printed step by step
//! - `chat`     — Interactive session that remembers earlier answers
//! - `doctor`   — Diagnose configuration
//! - `onboard`  — Write a default config file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "stratus",
    about = "Stratus — a step-driven weather agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single weather question
    Ask {
        /// The question; read from stdin when omitted
        query: Option<String>,

        /// Stop after this many steps instead of running until an answer
        #[arg(long)]
        max_steps: Option<u32>,
    },

    /// Chat with the weather agent
    Chat,

    /// Diagnose configuration
    Doctor,

    /// Initialize configuration
    Onboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env (GEMINI_API_KEY and friends) before the config reads the environment
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with answers on stdout
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask { query, max_steps } => commands::ask::run(query, max_steps).await?,
        Commands::Chat => commands::chat::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Onboard => commands::onboard::run().await?,
    }

    Ok(())
}
