//! Game configuration
//!
//! Grid geometry, balance constants and the level/skin catalog. Everything is
//! serde-backed so a collaborator can ship a JSON override; missing fields
//! fall back to the classic game.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::grid::Position;
use crate::sim::items::ItemKind;
use crate::sim::level::{Level, default_levels};
use crate::skins::{Skin, default_skins};

/// Balance constants for scoring and timed items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Max gap between food pickups that keeps the combo alive
    pub combo_window_ms: u64,
    /// Cap on the combo score multiplier
    pub max_combo_multiplier: u32,

    // === Bonus ===
    pub bonus_segments: u32,
    pub bonus_points: u64,
    pub bonus_lifetime_ms: u64,

    // === Poison ===
    pub poison_shrink: usize,
    pub poison_penalty: u64,
    pub poison_lifetime_ms: u64,
    /// Poison never shrinks the caterpillar below this
    pub min_length: usize,

    // === Power-up ===
    pub power_up_multiplier: u32,
    pub power_up_duration_ms: u64,
    pub power_up_lifetime_ms: u64,

    // === Spawning ===
    /// Per-tick chance of spawning each absent timed item kind
    pub item_spawn_chance: f64,
    /// Random attempts per placement before giving up for this tick
    pub placement_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            combo_window_ms: 3_000,
            max_combo_multiplier: 5,

            bonus_segments: 2,
            bonus_points: 30,
            bonus_lifetime_ms: 6_000,

            poison_shrink: 2,
            poison_penalty: 20,
            poison_lifetime_ms: 8_000,
            min_length: 3,

            power_up_multiplier: 2,
            power_up_duration_ms: 8_000,
            power_up_lifetime_ms: 6_000,

            item_spawn_chance: 0.02,
            placement_attempts: PLACEMENT_ATTEMPTS,
        }
    }
}

impl Tuning {
    /// Lifetime of a freshly spawned item of the given kind
    pub fn lifetime_ms(&self, kind: ItemKind) -> u64 {
        match kind {
            ItemKind::Bonus => self.bonus_lifetime_ms,
            ItemKind::Poison => self.poison_lifetime_ms,
            ItemKind::PowerUp => self.power_up_lifetime_ms,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Pixels per cell, used to map moving obstacles onto the grid
    pub cell_size: f32,
    pub initial_length: usize,
    pub tuning: Tuning,
    pub levels: Vec<Level>,
    pub skins: Vec<Skin>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_COUNT,
            grid_height: GRID_COUNT,
            cell_size: CELL_SIZE,
            initial_length: INITIAL_LENGTH,
            tuning: Tuning::default(),
            levels: default_levels(),
            skins: default_skins(),
        }
    }
}

impl GameConfig {
    /// Small open board with no levels beyond a single empty one (tests, demos)
    pub fn open_field(width: u32, height: u32, start: Position) -> Self {
        let mut config = Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        };
        config.levels.truncate(1);
        config.levels[0].start = start;
        config.levels[0].score_threshold = u64::MAX;
        config
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {}x{} grid, {} levels, {} skins",
            config.grid_width,
            config.grid_height,
            config.levels.len(),
            config.skins.len()
        );
        Ok(config)
    }

    /// Serialize for the persistence layer
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!("grid {}x{} is empty", self.grid_width, self.grid_height));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return invalid(format!("cell size {} must be a positive number", self.cell_size));
        }
        if self.initial_length == 0 {
            return invalid("initial length must be at least 1".into());
        }
        if self.tuning.min_length == 0 {
            return invalid("minimum length must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.tuning.item_spawn_chance) {
            return invalid(format!(
                "item spawn chance {} must be within [0, 1]",
                self.tuning.item_spawn_chance
            ));
        }
        if self.levels.is_empty() {
            return invalid("at least one level is required".into());
        }
        if self.skins.is_empty() {
            return invalid("at least one skin is required".into());
        }

        for level in &self.levels {
            self.validate_level(level)?;
        }
        Ok(())
    }

    fn validate_level(&self, level: &Level) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(format!("level {}: {}", level.name, msg)))
        };

        if level.speed == 0 {
            return invalid("speed must be positive".into());
        }
        for obstacle in &level.obstacles {
            if !obstacle.fits(self.grid_width, self.grid_height) {
                return invalid(format!("obstacle {:?} leaves the grid", obstacle));
            }
        }
        for moving in &level.moving_obstacles {
            let [min, max] = moving.range;
            if !(min.is_finite() && max.is_finite()) || min > max {
                return invalid(format!("moving obstacle range [{}, {}] is inverted", min, max));
            }
            if moving.direction.abs() != 1.0 {
                return invalid(format!("moving obstacle direction {} must be +1 or -1", moving.direction));
            }
            if !(moving.speed.is_finite() && moving.speed >= 0.0) {
                return invalid(format!("moving obstacle speed {} must be finite and non-negative", moving.speed));
            }
        }

        // The whole starting body must be on the board and clear of walls
        let back = level.start_direction.opposite();
        let mut segment = level.start;
        for _ in 0..self.initial_length {
            if !segment.in_bounds(self.grid_width, self.grid_height) {
                return invalid(format!("starting body leaves the grid at {:?}", segment));
            }
            if level.obstacles.iter().any(|o| o.contains(segment)) {
                return invalid(format!("starting body overlaps an obstacle at {:?}", segment));
            }
            segment = segment.step(back);
        }
        Ok(())
    }
}
