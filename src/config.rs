use crate::error::{config_error, env_error, AppResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Default port for the dashboard web server
pub const DEFAULT_PORT: u16 = 3000;

/// Default Gemini model used for insight summaries
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default timezone used to resolve the current month
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Default fiscal year shown on the planning timeline
pub const DEFAULT_FISCAL_YEAR: i32 = 2026;

const COMPONENTS_FILE: &str = "config/components.toml";

/// Main configuration structure for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Port the web server listens on
    pub port: u16,
    /// Gemini API key for insight summaries
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Timezone for resolving the current month (IANA name)
    pub timezone: String,
    /// Locale for labels and insight text
    pub locale: String,
    /// Fiscal year the monthly calendar represents
    pub fiscal_year: i32,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: "ko".to_string(),
            fiscal_year: DEFAULT_FISCAL_YEAR,
            components: default_components(),
        }
    }
}

fn default_components() -> HashMap<String, bool> {
    let mut components = HashMap::new();
    components.insert("roster".to_string(), true);
    components.insert("insight".to_string(), true);
    components
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let port = match env::var("EDUSPACE_PORT") {
            Ok(value) => value.parse::<u16>().map_err(|_| env_error("EDUSPACE_PORT"))?,
            Err(_) => DEFAULT_PORT,
        };

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
        let locale = env::var("APP_LOCALE").unwrap_or_else(|_| String::from("ko"));

        let fiscal_year = match env::var("FISCAL_YEAR") {
            Ok(value) => value.parse::<i32>().map_err(|_| env_error("FISCAL_YEAR"))?,
            Err(_) => DEFAULT_FISCAL_YEAR,
        };

        // Load components configuration from file if it exists
        let mut components = default_components();
        if let Ok(content) = fs::read_to_string(COMPONENTS_FILE) {
            let file_components = toml::from_str::<HashMap<String, bool>>(&content)?;
            components.extend(file_components);
        }

        let config = Config {
            port,
            gemini_api_key,
            gemini_model,
            timezone,
            locale,
            fiscal_year,
            components,
        };

        // Fail early on a bad timezone instead of at the first schedule edit
        config.tz()?;

        Ok(config)
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_components_enabled() {
        let config = Config::default();
        assert!(config.is_component_enabled("roster"));
        assert!(config.is_component_enabled("insight"));
        assert!(!config.is_component_enabled("unknown"));
    }

    #[test]
    fn test_timezone_parsing() {
        let mut config = Config::default();
        assert_eq!(config.tz().unwrap(), chrono_tz::Asia::Seoul);

        config.timezone = "Mars/Olympus".to_string();
        assert!(config.tz().is_err());
    }
}
