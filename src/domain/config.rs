//! Run configuration domain models.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Environment variable holding the completion API key.
pub const API_KEY_ENV: &str = "PODGEN_API_KEY";

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "podgen.toml";

/// Configuration for pipeline execution loaded from `podgen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Completion API configuration.
    #[serde(default)]
    pub api: CompletionApiConfig,
    /// Model selection.
    #[serde(default)]
    pub models: ModelConfig,
    /// Script length parameters.
    #[serde(default)]
    pub length: LengthConfig,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.api.validate()?;
        self.models.validate()?;
        self.length.validate()?;
        Ok(())
    }

    /// Load and validate configuration from a TOML file.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Completion API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionApiConfig {
    /// Chat-completions endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per call, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base delay between retries in milliseconds. Attempt n waits n * base.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CompletionApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl CompletionApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(AppError::InvalidConfig("max_attempts must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Model selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Model used for all pipeline stages.
    #[serde(default = "default_model")]
    pub default_model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { default_model: default_model() }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.default_model.trim().is_empty() {
            return Err(AppError::InvalidConfig("default_model must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Script length parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LengthConfig {
    /// Spoken words per minute used to size scripts.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    /// Safety margin applied on top of `duration * words_per_minute`.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for LengthConfig {
    fn default() -> Self {
        Self { words_per_minute: default_words_per_minute(), margin: default_margin() }
    }
}

impl LengthConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.words_per_minute == 0 {
            return Err(AppError::InvalidConfig(
                "words_per_minute must be greater than 0".to_string(),
            ));
        }
        if self.margin < 1.0 {
            return Err(AppError::InvalidConfig("margin must be at least 1.0".to_string()));
        }
        Ok(())
    }

    /// Target word count for a requested duration in minutes.
    pub fn target_word_count(&self, duration: u32) -> usize {
        let base = duration as f64 * self.words_per_minute as f64;
        (base * self.margin).round() as usize
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.openai.com/v1/chat/completions").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    45
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_words_per_minute() -> u32 {
    150
}

fn default_margin() -> f64 {
    1.2
}
