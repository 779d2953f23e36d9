//! Weather lookup tool backed by wttr.in.
//!
//! `GET {base_url}/{city}?format=%C %t` returns a one-line condition and
//! temperature such as `Partly cloudy +18°C`. Every outcome, including
//! transport failures, comes back as observation text.

use async_trait::async_trait;
use stratus_core::tool::{Tool, ToolResult};
use tracing::{debug, warn};

pub const NOT_AVAILABLE: &str = "Could not retrieve weather data.";
pub const CONNECTION_FAILED: &str = "Error connecting to weather service.";

pub struct WeatherTool {
    base_url: String,
    client: reqwest::Client,
}

impl WeatherTool {
    pub fn new(base_url: impl Into<String>, timeout: Option<std::time::Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: builder.build().unwrap_or_default(),
        }
    }

    /// `{base}/{lower-cased city}`, with the city percent-encoded as one
    /// path segment.
    fn lookup_url(&self, city: &str) -> Option<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(&city.to_lowercase());
        url.query_pairs_mut().append_pair("format", "%C %t");
        Some(url)
    }

    async fn fetch(&self, city: &str) -> Result<reqwest::Response, String> {
        let url = self
            .lookup_url(city)
            .ok_or_else(|| format!("invalid weather base URL '{}'", self.base_url))?;
        self.client.get(url).send().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Look up the current weather condition and temperature for a city."
    }

    fn input_hint(&self) -> &str {
        "city_name"
    }

    async fn execute(&self, input: &str) -> ToolResult {
        debug!(city = %input, "Looking up weather");

        let response = match self.fetch(input).await {
            Ok(response) => response,
            Err(e) => {
                warn!(city = %input, error = %e, "Weather service unreachable");
                return ToolResult::failed(CONNECTION_FAILED);
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            warn!(city = %input, status = %response.status(), "Weather lookup failed");
            return ToolResult::failed(NOT_AVAILABLE);
        }

        match response.text().await {
            Ok(body) => ToolResult::ok(format!("The weather in {input} is: {body}")),
            Err(e) => {
                warn!(city = %input, error = %e, "Weather response body unreadable");
                ToolResult::failed(CONNECTION_FAILED)
            }
        }
    }
}
