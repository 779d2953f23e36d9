pub mod ask;
pub mod chat;
pub mod doctor;
pub mod onboard;

use std::sync::Arc;
use std::time::Duration;

use stratus_agent::StepExecutor;
use stratus_config::AppConfig;
use stratus_tools::WeatherTool;

/// Load the config and wire provider, tools and executor together.
///
/// A missing API key is fatal here, before any model call is made.
pub(crate) fn build_executor() -> Result<(AppConfig, StepExecutor), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Err(e) = config.require_api_key() {
        eprintln!();
        eprintln!("  ERROR: {e}");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    GEMINI_API_KEY=...     (for Gemini, the default)");
        eprintln!("    OPENAI_API_KEY=...     (for OpenAI-compatible providers)");
        eprintln!("    STRATUS_API_KEY=...    (generic, highest priority)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let provider = stratus_providers::build_from_config(&config)?;

    let timeout = config.http.request_timeout_secs.map(Duration::from_secs);
    let weather = WeatherTool::new(config.weather.base_url.clone(), timeout);
    let tools = Arc::new(stratus_tools::registry_with_weather(weather));

    let model = config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone());

    let executor = StepExecutor::new(provider, model, tools)
        .with_temperature(config.default_temperature)
        .with_max_tokens(config.default_max_tokens);

    Ok((config, executor))
}
