//! Caterpillar - a grid arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, timed items, scoring)
//! - `config`: Data-driven grid, tuning, level and skin catalog
//! - `driver`: Fixed-rate loop that feeds ticks and fans out events
//! - `audio`: Sound cues derived from events
//! - `highscores`: In-memory leaderboard consumed by the persistence layer
//! - `skins`: Cosmetic skins unlocked by high score

pub mod audio;
pub mod config;
pub mod driver;
pub mod error;
pub mod highscores;
pub mod sim;
pub mod skins;

pub use config::{GameConfig, Tuning};
pub use driver::{Driver, EventSink};
pub use error::{ConfigError, SimError};
pub use highscores::HighScores;
pub use skins::Skin;

/// Game configuration constants
pub mod consts {
    /// Grid cells per side in the classic board
    pub const GRID_COUNT: u32 = 30;
    /// Pixel size of one grid cell (moving obstacles are authored in pixels)
    pub const CELL_SIZE: f32 = 20.0;
    /// Starting caterpillar length
    pub const INITIAL_LENGTH: usize = 5;
    /// Default tick interval in milliseconds
    pub const BASE_TICK_MS: u64 = 150;
    /// Maximum ticks per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Upper bound on random placement attempts per call
    pub const PLACEMENT_ATTEMPTS: u32 = 100;
}
