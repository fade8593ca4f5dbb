//! # Player Configuration
//!
//! Output settings for a [`Player`](crate::Player), read from YAML. Every key is optional:
//!
//! ```yaml
//! channel: 0          # driver output channel
//! volume: 10          # amplitude used by `Player::load`
//! pwm-frequency: 1000 # PWM carrier in Hz, for drivers that need one
//! pwm-resolution: 10  # PWM duty resolution in bits
//! ```
//!
//! The volume is a PWM duty value, so it may not exceed `2^pwm-resolution - 1`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::RtttlError;

pub const DEFAULT_VOLUME: u32 = 10;
pub const DEFAULT_PWM_FREQUENCY: u32 = 1000;
pub const DEFAULT_PWM_RESOLUTION: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PlayerConfig {
    pub channel: u8,
    pub volume: u32,
    pub pwm_frequency: u32,
    pub pwm_resolution: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            channel: 0,
            volume: DEFAULT_VOLUME,
            pwm_frequency: DEFAULT_PWM_FREQUENCY,
            pwm_resolution: DEFAULT_PWM_RESOLUTION,
        }
    }
}

impl PlayerConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml(content: &str) -> Result<Self, RtttlError> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: PlayerConfig =
            serde_yaml::from_str(content).map_err(|e| RtttlError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RtttlError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Largest duty value the PWM resolution can express.
    pub fn max_volume(&self) -> u32 {
        (1u32 << self.pwm_resolution.min(31)) - 1
    }

    pub fn validate(&self) -> Result<(), RtttlError> {
        if !(1..=16).contains(&self.pwm_resolution) {
            return Err(RtttlError::ConfigError(format!(
                "pwm-resolution must be between 1 and 16 bits, got {}",
                self.pwm_resolution
            )));
        }
        if self.pwm_frequency == 0 {
            return Err(RtttlError::ConfigError(
                "pwm-frequency must be greater than zero".to_string(),
            ));
        }
        if self.volume > self.max_volume() {
            return Err(RtttlError::ConfigError(format!(
                "volume {} exceeds the {}-bit maximum of {}",
                self.volume,
                self.pwm_resolution,
                self.max_volume()
            )));
        }
        Ok(())
    }
}
