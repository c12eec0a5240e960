//! Configuration for the order engine.
//!
//! Loaded once at startup into an immutable [`Config`] and passed into
//! constructors; no service mutates configuration at runtime.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml) or $ORDER_ENGINE_CONFIG
//! let config = load_config(None)?;
//! assert!(config.validation.enabled);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "ORDER_ENGINE_CONFIG";

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),
}

/// Pre-trade validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Run the validation gate on order creation. Production default: on.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Execution venue integration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Route order/cancel notifications to the venue client. Default: off.
    #[serde(default)]
    pub enabled: bool,
}

/// Read-cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Serve reads through the namespace caches. Default: on.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Pre-trade validation settings.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Execution venue settings.
    #[serde(default)]
    pub venue: VenueConfig,
    /// Read-cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

const fn default_true() -> bool {
    true
}

/// Load configuration from a YAML file.
///
/// Resolution order: explicit `path` argument, then `$ORDER_ENGINE_CONFIG`,
/// then `config.yaml`.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(
        || std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        ToString::to_string,
    );

    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
        path: path.clone(),
        source,
    })?;

    let config = serde_yaml_bw::from_str(&raw)?;
    Ok(config)
}
