//! Form configuration: rule limits and submit timing, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    #[error("invalid limits: {0}")]
    Limits(String),
}

/// Numeric bounds the rule set is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub full_name_max_chars: usize,
    pub min_donation_amount: f64,
    pub min_entries: usize,
    pub max_entries: usize,
    pub percentage_min: f64,
    pub percentage_max: f64,
    pub percentage_total: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            full_name_max_chars: 50,
            min_donation_amount: 10.0,
            min_entries: 1,
            max_entries: 3,
            percentage_min: 1.0,
            percentage_max: 100.0,
            percentage_total: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitSettings {
    /// Simulated round-trip of the stock logging submitter.
    pub delay_ms: u64,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}

impl SubmitSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub limits: Limits,
    pub submit: SubmitSettings,
}

impl FormConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        if limits.min_entries > limits.max_entries {
            return Err(ConfigError::Limits(format!(
                "min_entries {} exceeds max_entries {}",
                limits.min_entries, limits.max_entries
            )));
        }
        if limits.percentage_min > limits.percentage_max {
            return Err(ConfigError::Limits(format!(
                "percentage_min {} exceeds percentage_max {}",
                limits.percentage_min, limits.percentage_max
            )));
        }
        Ok(())
    }
}
