//! Runtime configuration, loaded from a TOML file with sane defaults.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [overview]
//! address = "0x..."
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub overview: OverviewConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Defaults applied when the CLI gives no overriding flags.
#[derive(Debug, Default, Deserialize)]
pub struct OverviewConfig {
    /// Address whose portfolio is watched when `--address` is absent.
    #[serde(default)]
    pub address: Option<String>,
    /// Scenario file replayed when `--scenario` is absent.
    #[serde(default)]
    pub scenario: Option<String>,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.logging.level.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected `pretty` or `json`, got `{}`", other),
                }
                .into())
            }
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            overview: OverviewConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.overview.address.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [overview]
            address = "0xabc"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.overview.address.as_deref(), Some("0xabc"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let config: Config = toml::from_str("[logging]\nformat = \"xml\"").unwrap();
        assert!(config.validate().is_err());
    }
}
