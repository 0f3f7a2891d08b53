//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised while validating loaded configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("ai.api_key is required when ai.provider is 'anthropic'")]
    MissingApiKey,

    #[error("memory.data_dir is required when memory.backend is 'filesystem'")]
    MissingDataDir,
}
