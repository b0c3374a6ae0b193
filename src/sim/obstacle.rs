//! Obstacle geometry
//!
//! Static obstacles are authored in grid cells. Moving obstacles are authored
//! in pixels (one cell = `cell_size` pixels) and patrol along one axis,
//! reflecting at the ends of their range.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Position;

/// Axis-aligned rectangle in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl GridRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if the cell lies inside the rectangle
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        let (x, y) = (i64::from(pos.x), i64::from(pos.y));
        x >= i64::from(self.x)
            && y >= i64::from(self.y)
            && x < i64::from(self.x) + i64::from(self.width)
            && y < i64::from(self.y) + i64::from(self.height)
    }

    /// True if the whole rectangle fits in a `width x height` grid
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.x) + i64::from(self.width) <= i64::from(width)
            && i64::from(self.y) + i64::from(self.height) <= i64::from(height)
    }
}

/// Axis a moving obstacle patrols along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// A patrolling obstacle (pixel space)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingObstacle {
    /// Top-left corner in pixels
    pub pos: Vec2,
    /// Width and height in pixels
    pub size: Vec2,
    pub axis: Axis,
    /// Pixels per tick
    pub speed: f32,
    /// +1.0 or -1.0
    pub direction: f32,
    /// Closed [min, max] bounds for the axis coordinate
    pub range: [f32; 2],
}

impl MovingObstacle {
    /// Coordinate along the patrol axis
    #[inline]
    pub fn axis_coord(&self) -> f32 {
        match self.axis {
            Axis::X => self.pos.x,
            Axis::Y => self.pos.y,
        }
    }

    /// Move one tick, then reflect if the bound was reached.
    ///
    /// The displacement is always applied first, so the obstacle may overshoot
    /// its bound by up to one step on the turning tick.
    pub fn advance(&mut self) {
        let step = self.speed * self.direction;
        match self.axis {
            Axis::X => self.pos.x += step,
            Axis::Y => self.pos.y += step,
        }

        let coord = self.axis_coord();
        let [min, max] = self.range;
        if self.direction > 0.0 && coord >= max {
            self.direction = -1.0;
        } else if self.direction < 0.0 && coord <= min {
            self.direction = 1.0;
        }
    }

    /// Copy of this obstacle one tick ahead
    pub fn advanced(&self) -> Self {
        let mut next = self.clone();
        next.advance();
        next
    }

    /// True if the obstacle's rectangle overlaps the given grid cell.
    ///
    /// Edges that merely touch do not overlap.
    pub fn covers_cell(&self, pos: Position, cell_size: f32) -> bool {
        let cell_min = Vec2::new(pos.x as f32, pos.y as f32) * cell_size;
        let cell_max = cell_min + Vec2::splat(cell_size);
        let obs_max = self.pos + self.size;

        cell_min.x < obs_max.x
            && self.pos.x < cell_max.x
            && cell_min.y < obs_max.y
            && self.pos.y < cell_max.y
    }
}
