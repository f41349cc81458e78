//! Adapter configuration settings
//!
//! Defines the configuration structures and their loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default CrofAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://ai.nahcrof.com/v2";

/// Main adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Upstream provider configuration
    pub provider: ProviderSettings,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Streaming request timeout in seconds
    pub stream_timeout: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Settings {
    /// Create a new configuration instance from the environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            provider: ProviderSettings {
                api_key: std::env::var("CROFAI_API_KEY")
                    .context("CROFAI_API_KEY environment variable not set")?,
                base_url: get_env_or_default("CROFAI_BASE_URL", DEFAULT_BASE_URL),
                timeout: get_env_or_default("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid timeout value")?,
                stream_timeout: get_env_or_default("STREAM_TIMEOUT", "300")
                    .parse()
                    .context("Invalid stream timeout value")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            anyhow::bail!("CrofAI API key cannot be empty");
        }

        if self.provider.api_key.contains(char::is_whitespace) {
            anyhow::bail!("CrofAI API key cannot contain whitespace characters");
        }

        if !self.provider.base_url.starts_with("http") {
            anyhow::bail!("Invalid CrofAI base URL format, should start with 'http'");
        }

        if self.provider.timeout == 0 || self.provider.stream_timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
