//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `HEALTH_COMPASS` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use health_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod memory;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use memory::{MemoryBackend, MemoryConfig};

use serde::Deserialize;

/// Root application configuration.
///
/// Every section has working defaults: with no environment set the binary
/// runs with the mock generator and the in-memory store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Text generation configuration.
    #[serde(default)]
    pub ai: AiConfig,

    /// Memory store configuration.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `HEALTH_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `HEALTH_COMPASS__AI__PROVIDER=anthropic` -> `ai.provider`
    /// - `HEALTH_COMPASS__MEMORY__BACKEND=filesystem` -> `memory.backend`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HEALTH_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.memory.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("HEALTH_COMPASS__AI__PROVIDER");
        env::remove_var("HEALTH_COMPASS__AI__API_KEY");
        env::remove_var("HEALTH_COMPASS__MEMORY__BACKEND");
        env::remove_var("HEALTH_COMPASS__MEMORY__DATA_DIR");
    }

    #[test]
    fn defaults_load_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert_eq!(config.memory.backend, MemoryBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HEALTH_COMPASS__AI__PROVIDER", "anthropic");
        env::set_var("HEALTH_COMPASS__AI__API_KEY", "sk-ant-xxx");
        env::set_var("HEALTH_COMPASS__MEMORY__BACKEND", "filesystem");
        env::set_var("HEALTH_COMPASS__MEMORY__DATA_DIR", "/tmp/compass");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Anthropic);
        assert_eq!(config.memory.backend, MemoryBackend::Filesystem);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn anthropic_without_api_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HEALTH_COMPASS__AI__PROVIDER", "anthropic");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingApiKey)
        ));
    }

    #[test]
    fn filesystem_backend_without_data_dir_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HEALTH_COMPASS__MEMORY__BACKEND", "filesystem");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingDataDir)
        ));
    }
}
