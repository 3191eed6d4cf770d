//! Runtime configuration for the predictor process

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Top-level runtime configuration.
///
/// Layered as built-in defaults, then an optional `config/predictor.toml`,
/// then `PREDICTOR_*` environment variables. A missing file is not an
/// error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// ONNX session tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of intra-op threads for session execution (default: 1)
    pub intra_threads: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter used when RUST_LOG is unset. All log output goes to
    /// stderr; stdout carries only the response body.
    pub filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { intra_threads: 1 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/predictor")
    }

    /// Load configuration, layering an optional file and the environment
    /// over the defaults.
    pub fn load_from_path(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("PREDICTOR").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();

        assert_eq!(config.session.intra_threads, 1);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = RuntimeConfig::load_from_path("config/does-not-exist").unwrap();

        assert_eq!(config.session.intra_threads, 1);
        assert_eq!(config.logging.filter, "warn");
    }
}
