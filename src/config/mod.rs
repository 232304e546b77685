// src/config/mod.rs
//! Instrument configuration

pub mod constants;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Complete instrument configuration with validation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InstrumentConfig {
    /// Identification string returned to the remote caller.
    #[serde(default = "defaults::identity")]
    pub identity: String,

    /// DDS frequency programmed at reset, Hz.
    #[serde(default = "defaults::default_frequency_hz")]
    pub default_frequency_hz: f64,

    /// Upper bound accepted by the set-frequency command, Hz.
    #[serde(default = "defaults::max_frequency_hz")]
    pub max_frequency_hz: f64,

    /// Pattern period programmed at reset. The calibration tables were
    /// characterized at this period.
    #[serde(default = "defaults::pattern_period")]
    pub pattern_period: u16,
}

/// Default value providers using constants
mod defaults {
    use super::constants::{frequency, pattern, protocol};

    pub fn identity() -> String {
        protocol::DEFAULT_IDENTITY.to_string()
    }

    pub fn default_frequency_hz() -> f64 {
        frequency::DEFAULT_DDS_FREQUENCY_HZ
    }

    pub fn max_frequency_hz() -> f64 {
        frequency::MAX_DDS_FREQUENCY_HZ
    }

    pub fn pattern_period() -> u16 {
        pattern::DEFAULT_PATTERN_PERIOD
    }
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            identity: defaults::identity(),
            default_frequency_hz: defaults::default_frequency_hz(),
            max_frequency_hz: defaults::max_frequency_hz(),
            pattern_period: defaults::pattern_period(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl InstrumentConfig {
    /// Parse a TOML document, falling back to defaults for absent fields,
    /// and validate the result.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity.is_empty() {
            return Err(ConfigError::Invalid {
                field: "identity",
                reason: "must not be empty".to_string(),
            });
        }
        if !(self.max_frequency_hz > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_frequency_hz",
                reason: format!("{} Hz is not positive", self.max_frequency_hz),
            });
        }
        if !(self.default_frequency_hz > 0.0)
            || self.default_frequency_hz > self.max_frequency_hz
        {
            return Err(ConfigError::Invalid {
                field: "default_frequency_hz",
                reason: format!(
                    "{} Hz outside (0, {}]",
                    self.default_frequency_hz, self.max_frequency_hz
                ),
            });
        }
        if self.pattern_period == 0 {
            return Err(ConfigError::Invalid {
                field: "pattern_period",
                reason: "must not be zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = InstrumentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_frequency_hz, 50_000.0);
        assert_eq!(config.pattern_period, 0x8FFF);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = InstrumentConfig::from_toml_str("default_frequency_hz = 1000.0\n").unwrap();
        assert_eq!(config.default_frequency_hz, 1_000.0);
        assert_eq!(config.max_frequency_hz, 100_000.0);
        assert_eq!(config.identity, constants::protocol::DEFAULT_IDENTITY);
    }

    #[test]
    fn test_default_above_max_rejected() {
        let result = InstrumentConfig::from_toml_str(
            "default_frequency_hz = 200000.0\nmax_frequency_hz = 100000.0\n",
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "default_frequency_hz",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_frequency_rejected() {
        assert!(InstrumentConfig::from_toml_str("default_frequency_hz = 0.0\n").is_err());
        assert!(InstrumentConfig::from_toml_str("max_frequency_hz = -5.0\n").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "identity = \"Bench Lab,AWG-1104,unit-7,0.1.0\"").unwrap();
        writeln!(file, "pattern_period = 0x7FFF").unwrap();
        let config = InstrumentConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.identity, "Bench Lab,AWG-1104,unit-7,0.1.0");
        assert_eq!(config.pattern_period, 0x7FFF);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = InstrumentConfig::load_from_path("/nonexistent/awg.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
