//! Encounter configuration.
//!
//! Every field has a default, so a TOML file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use corsair_core::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration for starting a new encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// RNG seed for determinism. Same seed = same encounter.
    pub seed: u64,
    /// Simulated seconds per tick. Cooldowns and AI timers advance by this much.
    pub tick_secs: f64,
    /// Distance from the nearest enemy at which a retreating ship escapes.
    pub escape_range: f64,
    /// Units per second a retreating ship opens the range.
    pub retreat_speed: f64,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_secs: DEFAULT_TICK_SECS,
            escape_range: DEFAULT_ESCAPE_RANGE,
            retreat_speed: DEFAULT_RETREAT_SPEED,
        }
    }
}

impl EncounterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_secs.is_finite() && self.tick_secs > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tick_secs",
                reason: format!("must be a positive number of seconds, got {}", self.tick_secs),
            });
        }
        if !(self.escape_range.is_finite() && self.escape_range > 0.0) {
            return Err(ConfigError::Invalid {
                field: "escape_range",
                reason: format!("must be positive, got {}", self.escape_range),
            });
        }
        // A zero speed is allowed: retreating ships then never get away.
        if !(self.retreat_speed.is_finite() && self.retreat_speed >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "retreat_speed",
                reason: format!("must not be negative, got {}", self.retreat_speed),
            });
        }
        Ok(())
    }
}
