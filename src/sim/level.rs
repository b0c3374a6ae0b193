//! Level descriptors and the built-in campaign

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, Position};
use super::obstacle::{Axis, GridRect, MovingObstacle};
use crate::consts::BASE_TICK_MS;

/// Immutable description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Relative speed (2 = classic pace)
    pub speed: u32,
    /// Background identifier for the renderer
    pub background: String,
    /// Points per food before combo and power-up multipliers
    pub food_points: u64,
    /// Score needed to move on to the next level
    pub score_threshold: u64,
    #[serde(default)]
    pub obstacles: Vec<GridRect>,
    #[serde(default)]
    pub moving_obstacles: Vec<MovingObstacle>,
    pub start: Position,
    #[serde(default)]
    pub start_direction: Direction,
}

impl Level {
    /// Nominal milliseconds between ticks for this level
    pub fn tick_ms(&self) -> u64 {
        BASE_TICK_MS * 2 / u64::from(self.speed.max(1))
    }
}

#[allow(clippy::too_many_arguments)]
fn patrol(x: f32, y: f32, w: f32, h: f32, speed: f32, direction: f32, axis: Axis, range: [f32; 2]) -> MovingObstacle {
    MovingObstacle {
        pos: Vec2::new(x, y),
        size: Vec2::new(w, h),
        axis,
        speed,
        direction,
        range,
    }
}

/// Meadow, Forest, Desert and Night on a 30x30 board of 20px cells
pub fn default_levels() -> Vec<Level> {
    let start = Position::new(15, 15);
    vec![
        Level {
            name: "Meadow".into(),
            speed: 2,
            background: "#87CEEB".into(),
            food_points: 10,
            score_threshold: 100,
            obstacles: Vec::new(),
            moving_obstacles: Vec::new(),
            start,
            start_direction: Direction::Right,
        },
        Level {
            name: "Forest".into(),
            speed: 3,
            background: "#90EE90".into(),
            food_points: 10,
            score_threshold: 300,
            obstacles: vec![GridRect::new(5, 10, 10, 2), GridRect::new(15, 5, 2, 10)],
            moving_obstacles: vec![patrol(100.0, 100.0, 40.0, 20.0, 2.0, 1.0, Axis::X, [100.0, 400.0])],
            start,
            start_direction: Direction::Right,
        },
        Level {
            name: "Desert".into(),
            speed: 4,
            background: "#F4A460".into(),
            food_points: 15,
            score_threshold: 600,
            obstacles: vec![
                GridRect::new(5, 5, 10, 2),
                GridRect::new(20, 10, 2, 10),
                GridRect::new(5, 20, 10, 2),
            ],
            moving_obstacles: vec![
                patrol(200.0, 50.0, 30.0, 30.0, 3.0, 1.0, Axis::Y, [50.0, 400.0]),
                patrol(400.0, 200.0, 20.0, 60.0, 2.0, -1.0, Axis::Y, [100.0, 400.0]),
            ],
            start,
            start_direction: Direction::Right,
        },
        Level {
            name: "Night".into(),
            speed: 5,
            background: "#191970".into(),
            food_points: 20,
            score_threshold: 1_000,
            obstacles: vec![
                GridRect::new(0, 10, 15, 2),
                GridRect::new(20, 5, 2, 10),
                GridRect::new(5, 25, 10, 2),
                GridRect::new(25, 20, 2, 10),
            ],
            moving_obstacles: vec![
                patrol(100.0, 100.0, 40.0, 20.0, 2.0, 1.0, Axis::X, [100.0, 400.0]),
                patrol(200.0, 200.0, 30.0, 30.0, 3.0, 1.0, Axis::Y, [100.0, 400.0]),
                patrol(400.0, 300.0, 20.0, 60.0, 4.0, -1.0, Axis::Y, [100.0, 400.0]),
            ],
            start,
            start_direction: Direction::Right,
        },
    ]
}
