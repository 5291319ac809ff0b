//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LOCALPAGES_*)
//! 2. TOML config file (if LOCALPAGES_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LOCALPAGES_*)
/// 2. TOML config file (if LOCALPAGES_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the content generation function.
    ///
    /// Set via LOCALPAGES_GENERATOR_URL environment variable.
    /// Required only when the HTTP generator is constructed.
    #[serde(default)]
    pub generator_url: Option<String>,

    /// Bearer token for the generation function.
    ///
    /// Set via LOCALPAGES_GENERATOR_API_KEY environment variable.
    #[serde(default)]
    pub generator_api_key: Option<String>,

    /// Path to SQLite content cache database.
    ///
    /// Set via LOCALPAGES_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for generation requests.
    ///
    /// Set via LOCALPAGES_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Generation request timeout in milliseconds.
    ///
    /// Set via LOCALPAGES_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./localpages-cache.sqlite")
}

fn default_user_agent() -> String {
    "localpages/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator_url: None,
            generator_api_key: None,
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LOCALPAGES_`
    /// 2. TOML file from `LOCALPAGES_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LOCALPAGES_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LOCALPAGES_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the generator endpoint is configured (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the endpoint is not set.
    pub fn require_generator_url(&self) -> Result<&str, ConfigError> {
        self.generator_url.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "generator_url".into(),
            hint: "Set LOCALPAGES_GENERATOR_URL environment variable".into(),
        })
    }

    /// Check if the generator API key is configured (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_generator_api_key(&self) -> Result<&str, ConfigError> {
        self.generator_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "generator_api_key".into(),
            hint: "Set LOCALPAGES_GENERATOR_API_KEY environment variable".into(),
        })
    }
}
