//! Built-in tool implementations for Stratus.
//!
//! The agent has exactly one capability: looking up the weather.

pub mod weather;

use stratus_core::tool::ToolRegistry;

pub use weather::WeatherTool;

/// Registry with a specifically configured weather tool.
pub fn registry_with_weather(weather: WeatherTool) -> ToolRegistry {
    ToolRegistry::new().with(Box::new(weather))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_weather() {
        let registry = registry_with_weather(WeatherTool::new("https://wttr.in", None));
        assert_eq!(registry.names(), vec!["get_weather"]);
        assert!(registry.resolve("get_weather").is_ok());
        assert!(registry.descriptions().contains("get_weather(city_name)"));
    }
}
