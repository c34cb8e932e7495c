//! Runtime configuration

use crate::error::{Result, StockError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use stocksage_llm::providers::OpenAIConfig;
use stocksage_utils::read_credential_file;
use tracing::debug;

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Default completion endpoint
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Credential file looked up in the working directory
pub const DEFAULT_API_KEY_FILE: &str = "api_key";
/// Where plot requests write their image
pub const DEFAULT_CHART_PATH: &str = "stock.png";
/// Trailing window of daily closes every indicator works on
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;

/// Configuration for a stocksage session
#[derive(Debug, Clone)]
pub struct SageConfig {
    /// Chat model identifier
    pub model: String,

    /// Base URL of the chat-completions API
    pub api_base: String,

    /// API credential
    pub api_key: String,

    /// Fixed path of the chart image, overwritten on every plot
    pub chart_path: PathBuf,

    /// HTTP timeout for completion requests
    pub request_timeout: Duration,

    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,

    /// Days of history fetched per calculation
    pub lookback_days: i64,
}

impl SageConfig {
    /// Create a new configuration builder
    pub fn builder() -> SageConfigBuilder {
        SageConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(StockError::ConfigError("model must not be empty".to_string()));
        }

        if self.api_key.is_empty() {
            return Err(StockError::ConfigError("API key must not be empty".to_string()));
        }

        if self.chart_path.as_os_str().is_empty() {
            return Err(StockError::ConfigError("chart path must not be empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        if self.lookback_days < 1 {
            return Err(StockError::ConfigError(
                "lookback must be at least one day".to_string(),
            ));
        }

        Ok(())
    }

    /// Provider configuration for the completion API
    pub fn openai_config(&self) -> OpenAIConfig {
        OpenAIConfig::new(self.api_key.clone())
            .with_api_base(self.api_base.clone())
            .with_timeout(self.request_timeout.as_secs())
    }
}

/// Builder for SageConfig
#[derive(Debug, Default)]
pub struct SageConfigBuilder {
    model: Option<String>,
    api_base: Option<String>,
    api_key: Option<String>,
    api_key_file: Option<PathBuf>,
    chart_path: Option<PathBuf>,
    request_timeout: Option<Duration>,
    temperature: Option<f32>,
    lookback_days: Option<i64>,
}

impl SageConfigBuilder {
    /// Set the chat model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the API key directly
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Read the API key from this file instead of `./api_key`
    pub fn api_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.api_key_file = Some(path.into());
        self
    }

    /// Set the chart image path
    pub fn chart_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chart_path = Some(path.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the history window in days
    pub fn lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = Some(days);
        self
    }

    /// Fill model, base URL and key from `OPENAI_MODEL`, `OPENAI_API_BASE`
    /// and `OPENAI_API_KEY`
    pub fn with_env(mut self) -> Self {
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            self.model = Some(model);
        }
        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            self.api_base = Some(base);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        self
    }

    /// Build the configuration
    ///
    /// The key comes from the credential file when one is configured or
    /// `./api_key` exists, and otherwise from the key set on the builder.
    pub fn build(self) -> Result<SageConfig> {
        let api_key = resolve_api_key(self.api_key_file.as_deref(), self.api_key)?;

        let config = SageConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key,
            chart_path: self
                .chart_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_PATH)),
            request_timeout: self.request_timeout.unwrap_or(Duration::from_secs(120)),
            temperature: self.temperature,
            lookback_days: self.lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS),
        };

        config.validate()?;
        Ok(config)
    }
}

fn resolve_api_key(file: Option<&Path>, fallback: Option<String>) -> Result<String> {
    if let Some(path) = file {
        return Ok(read_credential_file(path)?);
    }

    let default_file = Path::new(DEFAULT_API_KEY_FILE);
    if default_file.is_file() {
        debug!("Using credential file {}", default_file.display());
        return Ok(read_credential_file(default_file)?);
    }

    fallback.ok_or_else(|| {
        StockError::ConfigError(format!(
            "no API key: create ./{DEFAULT_API_KEY_FILE} or set OPENAI_API_KEY"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_defaults() {
        let config = SageConfig::builder().api_key("sk-test").build().unwrap();

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.chart_path, PathBuf::from("stock.png"));
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.lookback_days, 365);
        assert!(config.temperature.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = SageConfig::builder()
            .api_key("sk-test")
            .model("gpt-4o")
            .api_base("http://localhost:1234/v1")
            .chart_path("/tmp/aapl.png")
            .request_timeout(Duration::from_secs(30))
            .temperature(0.0)
            .build()
            .unwrap();

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, Some(0.0));

        let openai = config.openai_config();
        assert_eq!(openai.api_base, "http://localhost:1234/v1");
        assert_eq!(openai.timeout_secs, 30);
        assert_eq!(openai.api_key, "sk-test");
    }

    #[test]
    fn test_key_from_file_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sk-from-file").unwrap();

        let config = SageConfig::builder()
            .api_key("sk-from-env")
            .api_key_file(file.path())
            .build()
            .unwrap();

        assert_eq!(config.api_key, "sk-from-file");
    }

    #[test]
    fn test_missing_key_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SageConfig::builder()
            .api_key_file(dir.path().join("missing"))
            .build();

        assert!(matches!(result, Err(StockError::Credential(_))));
    }

    #[test]
    fn test_validation() {
        let zero_timeout = SageConfig::builder()
            .api_key("sk-test")
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(zero_timeout, Err(StockError::ConfigError(_))));

        let empty_model = SageConfig::builder().api_key("sk-test").model(" ").build();
        assert!(matches!(empty_model, Err(StockError::ConfigError(_))));

        let no_history = SageConfig::builder()
            .api_key("sk-test")
            .lookback_days(0)
            .build();
        assert!(matches!(no_history, Err(StockError::ConfigError(_))));
    }
}
