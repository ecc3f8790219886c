//! Configuration for the analysis pipeline

use crate::error::{AnalyzerError, Result};
use std::time::Duration;

/// Default Groq model used for analysis and recommendations
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default history window passed to the market-data provider
pub const DEFAULT_PERIOD: &str = "1mo";

/// Default bar interval passed to the market-data provider
pub const DEFAULT_INTERVAL: &str = "1d";

/// Configuration for the analysis pipeline
///
/// API keys may be empty; the affected components then degrade at call time
/// the same way any provider failure does.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Groq API key
    pub groq_api_key: String,

    /// Serper API key
    pub serper_api_key: String,

    /// Model used for analysis and recommendations
    pub model: String,

    /// History window for the price series (e.g. "5d", "1mo")
    pub period: String,

    /// Bar interval for the price series (e.g. "1h", "1d")
    pub interval: String,

    /// Timeout for market-data requests
    pub request_timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            groq_api_key: String::new(),
            serper_api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            period: DEFAULT_PERIOD.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Default configuration with API keys taken from `GROQ_API_KEY` and
    /// `SERPER_API_KEY`
    pub fn from_env() -> Self {
        Self {
            groq_api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            serper_api_key: std::env::var("SERPER_API_KEY").unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AnalyzerError::Config("model must not be empty".to_string()));
        }
        if self.period.trim().is_empty() {
            return Err(AnalyzerError::Config(
                "period must not be empty".to_string(),
            ));
        }
        if self.interval.trim().is_empty() {
            return Err(AnalyzerError::Config(
                "interval must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for AnalyzerConfig
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    groq_api_key: Option<String>,
    serper_api_key: Option<String>,
    model: Option<String>,
    period: Option<String>,
    interval: Option<String>,
    request_timeout: Option<Duration>,
}

impl AnalyzerConfigBuilder {
    /// Set the Groq API key
    pub fn groq_api_key(mut self, key: impl Into<String>) -> Self {
        self.groq_api_key = Some(key.into());
        self
    }

    /// Set the Serper API key
    pub fn serper_api_key(mut self, key: impl Into<String>) -> Self {
        self.serper_api_key = Some(key.into());
        self
    }

    /// Set the analysis model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the history window
    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    /// Set the bar interval
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Set the market-data request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load both API keys from the environment
    pub fn with_env_keys(mut self) -> Self {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            self.groq_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("SERPER_API_KEY") {
            self.serper_api_key = Some(key);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalyzerConfig> {
        let defaults = AnalyzerConfig::default();

        let config = AnalyzerConfig {
            groq_api_key: self.groq_api_key.unwrap_or(defaults.groq_api_key),
            serper_api_key: self.serper_api_key.unwrap_or(defaults.serper_api_key),
            model: self.model.unwrap_or(defaults.model),
            period: self.period.unwrap_or(defaults.period),
            interval: self.interval.unwrap_or(defaults.interval),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.period, "1mo");
        assert_eq!(config.interval, "1d");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::builder()
            .groq_api_key("gk")
            .serper_api_key("sk")
            .period("5d")
            .interval("1h")
            .request_timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.groq_api_key, "gk");
        assert_eq!(config.period, "5d");
        assert_eq!(config.interval, "1h");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation_rejects_empty_period() {
        let config = AnalyzerConfig {
            period: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_model() {
        let config = AnalyzerConfig {
            model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
