//! Recognizer settings, persisted by the demo as JSON in `localStorage`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STORAGE_KEY: &str = "pz_pinch_config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse pinch config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pinch threshold must be a finite, non-negative distance (got {0})")]
    InvalidThreshold(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Minimum change in finger separation, in screen units, before a pinch
    /// begins.
    pub threshold: f64,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self { threshold: 5.0 }
    }
}

impl PinchConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: PinchConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    pub fn with_threshold(self, threshold: f64) -> Result<Self, ConfigError> {
        let config = Self { threshold, ..self };
        config.validate()?;
        Ok(config)
    }
}
