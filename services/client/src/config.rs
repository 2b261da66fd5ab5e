//! services/client/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development.

use smartchef_core::Locale;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the recipe backend (favorites, accounts, discovery).
    pub api_base_url: String,
    /// Endpoint of the public translation capability.
    pub translate_endpoint: String,
    /// Where the bearer token and display name persist between runs.
    pub credentials_path: PathBuf,
    pub default_locale: Locale,
    pub request_timeout: Duration,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure
    /// tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let translate_endpoint = std::env::var("TRANSLATE_ENDPOINT").unwrap_or_else(|_| {
            "https://translate.googleapis.com/translate_a/single".to_string()
        });

        let credentials_path = std::env::var("CREDENTIALS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./.smartchef/credentials.json"));

        let locale_str =
            std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "english".to_string());
        let default_locale = locale_str
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidValue("DEFAULT_LANGUAGE".to_string(), e))?;

        let timeout_str =
            std::env::var("REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "15".to_string());
        let request_timeout = timeout_str
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "REQUEST_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a number of seconds", timeout_str),
                )
            })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_base_url,
            translate_endpoint,
            credentials_path,
            default_locale,
            request_timeout,
            log_level,
        })
    }
}
