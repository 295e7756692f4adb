//! Session configuration
//!
//! Defaults reproduce the reference pacing: one active tick per 6 raw ticks,
//! a forced drop every 6 active ticks, one step faster every 15 spawns, never
//! faster than 1.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{INITIAL_SPEED, MIN_SPEED, SCORE_DIGITS, SPEED_STEP_PIECES, TICK_THROTTLE};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Raw ticks per active tick
    pub tick_throttle: u32,
    /// Active ticks between forced drops at session start
    pub initial_speed: u32,
    /// Spawns per speed step
    pub speed_step: u32,
    /// Floor of the speed curve
    pub min_speed: u32,
    /// Width of the zero-padded score text
    pub score_digits: usize,
    /// Seed of the default shape source
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_throttle: TICK_THROTTLE,
            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP_PIECES,
            min_speed: MIN_SPEED,
            score_digits: SCORE_DIGITS,
            seed: 1,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Apply `CRATE_TETRIS_SEED` and `CRATE_TETRIS_TICK_THROTTLE` on top of `self`
    ///
    /// Unparsable values are ignored.
    pub fn with_env(mut self) -> Self {
        use std::env;

        if let Some(seed) = env::var("CRATE_TETRIS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            self.seed = seed;
        }

        if let Some(throttle) = env::var("CRATE_TETRIS_TICK_THROTTLE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            self.tick_throttle = throttle;
        }

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_throttle == 0 {
            return Err(ConfigError::ZeroThrottle);
        }
        if self.initial_speed == 0 || self.min_speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.speed_step == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }
        if self.min_speed > self.initial_speed {
            return Err(ConfigError::MinSpeedAboveInitial {
                min: self.min_speed,
                initial: self.initial_speed,
            });
        }
        if self.score_digits == 0 || self.score_digits > 10 {
            return Err(ConfigError::ScoreDigits(self.score_digits));
        }
        Ok(())
    }

    /// Active ticks between forced drops after `spawned` spawns
    pub fn speed_for(&self, spawned: u32) -> u32 {
        self.initial_speed
            .saturating_sub(spawned / self.speed_step)
            .max(self.min_speed)
    }
}
