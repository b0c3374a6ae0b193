//! Terminal collision detection for the caterpillar's head
//!
//! Checks run in a fixed priority order and the first hit wins. All of them
//! end the run, but the reason is reported for diagnostics and sound cues.

use super::grid::Position;
use super::obstacle::{GridRect, MovingObstacle};
use super::state::{Caterpillar, GameOverReason};

/// Everything the head can crash into this tick
pub struct CollisionScene<'a> {
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
    pub caterpillar: &'a Caterpillar,
    pub obstacles: &'a [GridRect],
    /// Moving obstacles already advanced to their position for this tick
    pub moving: &'a [MovingObstacle],
}

/// Returns the reason the head dies at `head`, if any.
///
/// `growing` keeps the tail cell occupied for the self-collision check.
pub fn terminal_collision(scene: &CollisionScene<'_>, head: Position, growing: bool) -> Option<GameOverReason> {
    if !head.in_bounds(scene.width, scene.height) {
        return Some(GameOverReason::OutOfBounds);
    }
    if scene.caterpillar.bites_itself(head, growing) {
        return Some(GameOverReason::SelfCollision);
    }
    if scene.obstacles.iter().any(|o| o.contains(head)) {
        return Some(GameOverReason::StaticObstacle);
    }
    if scene.moving.iter().any(|m| m.covers_cell(head, scene.cell_size)) {
        return Some(GameOverReason::MovingObstacle);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Direction;
    use crate::sim::obstacle::Axis;
    use glam::Vec2;

    fn scene<'a>(cat: &'a Caterpillar, obstacles: &'a [GridRect], moving: &'a [MovingObstacle]) -> CollisionScene<'a> {
        CollisionScene {
            width: 10,
            height: 10,
            cell_size: 20.0,
            caterpillar: cat,
            obstacles,
            moving,
        }
    }

    #[test]
    fn test_open_cell_is_safe() {
        let cat = Caterpillar::new(Position::new(4, 4), Direction::Right, 3);
        let s = scene(&cat, &[], &[]);
        assert_eq!(terminal_collision(&s, Position::new(5, 4), false), None);
    }

    #[test]
    fn test_out_of_bounds_wins_over_everything() {
        let cat = Caterpillar::new(Position::new(0, 4), Direction::Left, 1);
        let s = scene(&cat, &[], &[]);
        assert_eq!(
            terminal_collision(&s, Position::new(-1, 4), false),
            Some(GameOverReason::OutOfBounds)
        );
        assert_eq!(
            terminal_collision(&s, Position::new(3, 10), false),
            Some(GameOverReason::OutOfBounds)
        );
    }

    #[test]
    fn test_self_before_static() {
        let cat = Caterpillar::new(Position::new(4, 4), Direction::Right, 3);
        let walls = [GridRect::new(3, 4, 1, 1)];
        let s = scene(&cat, &walls, &[]);
        assert_eq!(
            terminal_collision(&s, Position::new(3, 4), false),
            Some(GameOverReason::SelfCollision)
        );
    }

    #[test]
    fn test_static_and_moving() {
        let cat = Caterpillar::new(Position::new(4, 4), Direction::Right, 1);
        let walls = [GridRect::new(5, 4, 1, 1)];
        let patrol = [MovingObstacle {
            pos: Vec2::new(100.0, 40.0),
            size: Vec2::new(20.0, 20.0),
            axis: Axis::X,
            speed: 1.0,
            direction: 1.0,
            range: [0.0, 180.0],
        }];
        let s = scene(&cat, &walls, &patrol);
        assert_eq!(
            terminal_collision(&s, Position::new(5, 4), false),
            Some(GameOverReason::StaticObstacle)
        );
        assert_eq!(
            terminal_collision(&s, Position::new(5, 2), false),
            Some(GameOverReason::MovingObstacle)
        );
    }
}
