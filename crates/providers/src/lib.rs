//! Completion endpoint clients for Stratus.
//!
//! All providers implement the `stratus_core::Provider` trait.
//! [`build_from_config`] picks the configured one at startup.

pub mod gemini;
pub mod openai_compat;

use std::sync::Arc;
use std::time::Duration;

use stratus_config::AppConfig;
use stratus_core::error::ProviderError;
use stratus_core::provider::Provider;

pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatProvider;

/// Build the default provider named in the configuration.
///
/// `gemini` uses the native Gemini API; every other name is treated as an
/// OpenAI-compatible endpoint, with `providers.<name>.api_url` overriding
/// the well-known base URL.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let name = config.default_provider.as_str();
    let api_key = config
        .api_key_for(name)
        .ok_or_else(|| ProviderError::NotConfigured(format!("no API key for '{name}'")))?;
    let api_url = config
        .providers
        .get(name)
        .and_then(|p| p.api_url.clone());
    let timeout = config.http.request_timeout_secs.map(Duration::from_secs);

    let provider: Arc<dyn Provider> = if name == "gemini" {
        let mut p = GeminiProvider::new(api_key).with_timeout(timeout);
        if let Some(url) = api_url {
            p = p.with_base_url(url);
        }
        Arc::new(p)
    } else {
        let base_url = api_url
            .or_else(|| default_base_url(name))
            .ok_or_else(|| {
                ProviderError::NotConfigured(format!(
                    "unknown provider '{name}': set providers.{name}.api_url"
                ))
            })?;
        Arc::new(OpenAiCompatProvider::new(name, base_url, api_key).with_timeout(timeout))
    };

    Ok(provider)
}

/// Get the default base URL for well-known OpenAI-compatible providers.
fn default_base_url(provider_name: &str) -> Option<String> {
    let url = match provider_name {
        "openai" => "https://api.openai.com/v1",
        "openrouter" => "https://openrouter.ai/api/v1",
        "ollama" => "http://localhost:11434/v1",
        "groq" => "https://api.groq.com/openai/v1",
        "deepseek" => "https://api.deepseek.com/v1",
        _ => return None,
    };
    Some(url.to_string())
}

/// HTTP client shared by the providers; `timeout` of `None` leaves
/// request duration to the transport.
pub(crate) fn http_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratus_config::ProviderConfig;

    #[test]
    fn default_config_without_key_is_not_configured() {
        let config = AppConfig::default();
        assert!(matches!(
            build_from_config(&config),
            Err(ProviderError::NotConfigured(_))
        ));
    }

    #[test]
    fn builds_gemini_by_default() {
        let config = AppConfig {
            api_key: Some("g-key".into()),
            ..AppConfig::default()
        };
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn builds_openai_compatible_provider() {
        let mut config = AppConfig {
            default_provider: "openrouter".into(),
            ..AppConfig::default()
        };
        config.providers.insert(
            "openrouter".into(),
            ProviderConfig {
                api_key: Some("sk-or".into()),
                ..ProviderConfig::default()
            },
        );
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn unknown_provider_needs_url() {
        let config = AppConfig {
            api_key: Some("k".into()),
            default_provider: "mystery".into(),
            ..AppConfig::default()
        };
        assert!(build_from_config(&config).is_err());
    }

    #[test]
    fn default_base_urls() {
        assert!(default_base_url("openai").unwrap().contains("api.openai.com"));
        assert!(default_base_url("ollama").unwrap().contains("localhost:11434"));
        assert!(default_base_url("nope").is_none());
    }
}
