//! Text generation configuration.

use secrecy::Secret;
use serde::Deserialize;

use super::ValidationError;

/// Which generator implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// Offline mock generator (default; no credentials needed).
    #[default]
    Mock,
    /// Anthropic Messages API.
    Anthropic,
}

/// Configuration for the text generation service.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Provider to use.
    #[serde(default)]
    pub provider: AiProvider,

    /// API key, required for the anthropic provider.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl AiConfig {
    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == AiProvider::Anthropic && self.api_key.is_none() {
            return Err(ValidationError::MissingApiKey);
        }
        Ok(())
    }
}
