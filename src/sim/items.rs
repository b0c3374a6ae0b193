//! Timed items and random placement
//!
//! Food, bonus, poison and power-up cells are all placed by the same bounded
//! rejection sampler. Exhausting the attempt budget is not an error; the caller
//! retries on a later tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Position;

/// Timed collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Extra segments and points
    Bonus,
    /// Costs points and tail segments
    Poison,
    /// Temporary score multiplier
    PowerUp,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Bonus, ItemKind::Poison, ItemKind::PowerUp];
}

/// A collectible with a limited lifetime (game-clock milliseconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedItem {
    pub kind: ItemKind,
    pub pos: Position,
    pub spawned_ms: u64,
    pub expires_ms: u64,
}

impl TimedItem {
    pub fn new(kind: ItemKind, pos: Position, now_ms: u64, lifetime_ms: u64) -> Self {
        Self {
            kind,
            pos,
            spawned_ms: now_ms,
            expires_ms: now_ms.saturating_add(lifetime_ms),
        }
    }

    /// Expired once the clock is strictly past the expiry stamp
    #[inline]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires_ms
    }
}

/// What a placement call was trying to put on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementTarget {
    Food,
    Item(ItemKind),
}

/// Sample up to `attempts` uniform cells and return the first free one
pub fn place<R, F>(rng: &mut R, width: u32, height: u32, attempts: u32, is_free: F) -> Option<Position>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    if width == 0 || height == 0 {
        return None;
    }
    (0..attempts)
        .map(|_| {
            Position::new(
                rng.random_range(0..width) as i32,
                rng.random_range(0..height) as i32,
            )
        })
        .find(|&pos| is_free(pos))
}
