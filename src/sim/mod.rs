//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from the caller, never the wall clock
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod grid;
pub mod items;
pub mod level;
pub mod lifecycle;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use collision::{CollisionScene, terminal_collision};
pub use grid::{Direction, Position};
pub use items::{ItemKind, PlacementTarget, TimedItem};
pub use level::{Level, default_levels};
pub use obstacle::{Axis, GridRect, MovingObstacle};
pub use state::{
    ActiveEffects, Caterpillar, GameClock, GameEvent, GameOverReason, GamePhase, GameState, RngState,
};
pub use tick::{TickInput, tick, tick_interval_ms};
