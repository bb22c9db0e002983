//! Runtime configuration for board services.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Error type for loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the expiry sweep and request validation.
///
/// Every field is optional in the JSON form; missing keys take the defaults.
///
/// ```json
/// { "sweepIntervalMs": 500, "nameMaxLen": 64 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BoardConfig {
    /// Period of the background expiry sweep.
    pub sweep_interval_ms: u64,
    pub name_min_len: usize,
    pub name_max_len: usize,
    pub data_max_len: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            sweep_interval_ms: 1_000,
            name_min_len: 3,
            name_max_len: 50,
            data_max_len: 1_000,
        }
    }
}

impl BoardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_interval_ms == 0 {
            return Err(ConfigError::Invalid("sweepIntervalMs must be positive".into()));
        }
        if self.name_min_len > self.name_max_len {
            return Err(ConfigError::Invalid(
                "nameMinLen must not exceed nameMaxLen".into(),
            ));
        }
        Ok(())
    }
}
