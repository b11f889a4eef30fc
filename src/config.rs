//! Game tuning and configuration
//!
//! Every gameplay constant can be overridden from JSON; missing fields fall
//! back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Arena;

/// Game tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Player ===
    pub player_size: f32,
    /// Pixels per frame
    pub player_speed: f32,
    /// Spawn y is this far above the bottom edge
    pub player_spawn_offset: f32,

    // === Hazards ===
    pub hazard_min_size: f32,
    pub hazard_max_size: f32,
    pub hazard_min_speed: f32,
    pub hazard_max_speed: f32,
    /// Extra speed = score / divisor, read at spawn time
    pub hazard_score_divisor: f32,

    // === Pickups ===
    pub pickup_size: f32,
    pub pickup_speed: f32,

    // === Cadence (frames) ===
    pub hazard_spawn_interval: u64,
    pub pickup_spawn_interval: u64,
    pub survival_interval: u64,

    // === Scoring ===
    pub survival_bonus: u64,
    pub pickup_bonus: u64,

    /// Idle entities retained per pool
    pub pool_capacity: usize,

    /// Fixed RNG seed (random per run when unset)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_spawn_offset: PLAYER_SPAWN_OFFSET,

            hazard_min_size: HAZARD_MIN_SIZE,
            hazard_max_size: HAZARD_MAX_SIZE,
            hazard_min_speed: HAZARD_MIN_SPEED,
            hazard_max_speed: HAZARD_MAX_SPEED,
            hazard_score_divisor: HAZARD_SCORE_DIVISOR,

            pickup_size: PICKUP_SIZE,
            pickup_speed: PICKUP_SPEED,

            hazard_spawn_interval: HAZARD_SPAWN_INTERVAL,
            pickup_spawn_interval: PICKUP_SPAWN_INTERVAL,
            survival_interval: SURVIVAL_INTERVAL,

            survival_bonus: SURVIVAL_BONUS,
            pickup_bonus: PICKUP_BONUS,

            pool_capacity: POOL_CAPACITY,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Arena bounds described by this config
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("hazard_min_size", self.hazard_min_size),
            ("hazard_min_speed", self.hazard_min_speed),
            ("hazard_score_divisor", self.hazard_score_divisor),
            ("pickup_size", self.pickup_size),
            ("pickup_speed", self.pickup_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !(self.hazard_max_size > self.hazard_min_size) {
            return Err(ConfigError::Invalid(
                "hazard size range is empty".to_string(),
            ));
        }
        if !(self.hazard_max_speed > self.hazard_min_speed) {
            return Err(ConfigError::Invalid(
                "hazard speed range is empty".to_string(),
            ));
        }

        let intervals = [
            ("hazard_spawn_interval", self.hazard_spawn_interval),
            ("pickup_spawn_interval", self.pickup_spawn_interval),
            ("survival_interval", self.survival_interval),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be non-zero", name)));
            }
        }

        let largest = self
            .player_size
            .max(self.hazard_max_size)
            .max(self.pickup_size);
        if largest > self.arena_width || largest > self.arena_height {
            return Err(ConfigError::Invalid(format!(
                "entities up to {} px do not fit a {}x{} arena",
                largest, self.arena_width, self.arena_height
            )));
        }
        if self.player_spawn_offset < self.player_size
            || self.player_spawn_offset > self.arena_height
        {
            return Err(ConfigError::Invalid(format!(
                "player_spawn_offset {} must lie in [{}, {}]",
                self.player_spawn_offset, self.player_size, self.arena_height
            )));
        }

        Ok(())
    }
}
