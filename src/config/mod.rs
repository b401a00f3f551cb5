//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SPIRIT_GUIDE_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use spirit_guide::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Talking to {}", config.api.base_url);
//! ```

mod api;
mod error;
mod logging;
mod storage;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// development setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Spirit Guide backend (base URL, timeout)
    #[serde(default)]
    pub api: ApiConfig,

    /// On-disk location for conversations and tokens
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SPIRIT_GUIDE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SPIRIT_GUIDE__API__BASE_URL=https://...` -> `api.base_url = ...`
    /// - `SPIRIT_GUIDE__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SPIRIT_GUIDE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate(&self.environment)?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "SPIRIT_GUIDE__ENVIRONMENT",
        "SPIRIT_GUIDE__API__BASE_URL",
        "SPIRIT_GUIDE__API__TIMEOUT_SECS",
        "SPIRIT_GUIDE__STORAGE__DATA_DIR",
        "SPIRIT_GUIDE__LOGGING__JSON",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("SPIRIT_GUIDE__API__BASE_URL", "https://guide.example.com/api");
        env::set_var("SPIRIT_GUIDE__API__TIMEOUT_SECS", "10");
        env::set_var("SPIRIT_GUIDE__STORAGE__DATA_DIR", "/tmp/guide");
        env::set_var("SPIRIT_GUIDE__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://guide.example.com/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage.data_dir, std::path::PathBuf::from("/tmp/guide"));
        assert!(config.logging.json);
    }

    #[test]
    fn test_production_rejects_plain_http() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("SPIRIT_GUIDE__ENVIRONMENT", "production");
        env::set_var("SPIRIT_GUIDE__API__BASE_URL", "http://guide.example.com");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::BaseUrlMustBeHttps));
    }
}
