//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame, and everything `tick` needs to
//! produce the next one, lives in `GameState`. There are no globals.

use std::collections::VecDeque;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, Position};
use super::items::{ItemKind, PlacementTarget, TimedItem, place};
use super::level::Level;
use super::obstacle::{GridRect, MovingObstacle};
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start command
    Ready,
    /// Active gameplay
    Running,
    /// Ticks are ignored and the game clock is frozen
    Paused,
    /// Run ended on a terminal collision
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    OutOfBounds,
    SelfCollision,
    StaticObstacle,
    MovingObstacle,
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { score: u64, combo: u32 },
    BonusCollected { score: u64 },
    PoisonCollected { score: u64, removed: usize },
    PowerUpCollected { multiplier: u32, until_ms: u64 },
    PowerUpEnded,
    ItemSpawned { kind: ItemKind, pos: Position },
    ItemExpired { kind: ItemKind },
    PlacementExhausted { target: PlacementTarget },
    GameOver { reason: GameOverReason },
    LevelComplete { completed: usize, next: usize },
}

/// The player's caterpillar (head first)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caterpillar {
    pub body: VecDeque<Position>,
    pub direction: Direction,
}

impl Caterpillar {
    /// Straight caterpillar with the body trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let body = std::iter::successors(Some(head), |seg| Some(seg.step(back)))
            .take(length.max(1))
            .collect();
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a caterpillar keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Would moving the head onto `pos` bite the body?
    ///
    /// The tail cell is vacated this tick unless the caterpillar grows, so it
    /// only counts when `growing` is set.
    pub fn bites_itself(&self, pos: Position, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(checked).any(|&seg| seg == pos)
    }

    /// Prepend the new head; keep the tail only when growing
    pub fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Drop up to `count` tail segments without going below `min_len`.
    /// Returns how many were removed.
    pub fn shrink(&mut self, count: usize, min_len: usize) -> usize {
        let removable = self.body.len().saturating_sub(min_len.max(1)).min(count);
        self.body.truncate(self.body.len() - removable);
        removable
    }
}

/// Active power-up effects and owed growth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Score multiplier from a power-up (1 when none)
    pub multiplier: u32,
    /// Game-clock stamp when the multiplier wears off
    pub multiplier_until_ms: Option<u64>,
    /// Segments still owed from bonus pickups, paid one per tick
    pub pending_growth: u32,
}

impl Default for ActiveEffects {
    fn default() -> Self {
        Self {
            multiplier: 1,
            multiplier_until_ms: None,
            pending_growth: 0,
        }
    }
}

impl ActiveEffects {
    /// Score multiplier in force at game time `now_ms`
    pub fn multiplier_at(&self, now_ms: u64) -> u32 {
        match self.multiplier_until_ms {
            Some(until) if now_ms > until => 1,
            _ => self.multiplier,
        }
    }

    /// Consume one owed growth segment, if any
    pub fn take_growth(&mut self) -> bool {
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            true
        } else {
            false
        }
    }
}

/// RNG state wrapper for serialization.
///
/// Each draw session gets its own PCG stream so the state stays a pair of
/// integers instead of an opaque generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Generator for the next draw session
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream = self.stream.wrapping_add(1);
        rng
    }
}

/// Pause-aware game clock.
///
/// Tracks how much game time has passed given the caller's timestamps. After a
/// resync (start, level load, resume) the next tick advances by the nominal
/// tick interval, so time spent paused is never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    /// Elapsed game time
    pub now_ms: u64,
    /// Caller timestamp seen on the previous running tick
    last_wall_ms: Option<u64>,
}

impl GameClock {
    pub fn advance(&mut self, wall_ms: u64, nominal_ms: u64) -> u64 {
        let delta = match self.last_wall_ms {
            Some(last) => wall_ms.saturating_sub(last),
            None => nominal_ms,
        };
        self.now_ms = self.now_ms.saturating_add(delta);
        self.last_wall_ms = Some(wall_ms);
        self.now_ms
    }

    /// Forget the last caller timestamp
    pub fn resync(&mut self) {
        self.last_wall_ms = None;
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub phase: GamePhase,
    /// Index into `config.levels`
    pub level_index: usize,
    /// Index into `config.skins`, kept across levels and restarts
    pub skin: usize,
    pub caterpillar: Caterpillar,
    pub food: Option<Position>,
    /// Active timed items, at most one per kind
    pub items: Vec<TimedItem>,
    pub obstacles: Vec<GridRect>,
    pub moving_obstacles: Vec<MovingObstacle>,
    pub score: u64,
    /// Consecutive pickups within the combo window
    pub combo: u32,
    /// Game-clock stamp of the last food pickup
    pub last_food_ms: Option<u64>,
    pub effects: ActiveEffects,
    pub clock: GameClock,
    /// Running ticks processed since start
    pub time_ticks: u64,
}

impl GameState {
    /// Create an idle game waiting for `start`
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let center = Position::new((config.grid_width / 2) as i32, (config.grid_height / 2) as i32);
        Self {
            config,
            seed,
            rng_state: RngState::new(seed),
            phase: GamePhase::Ready,
            level_index: 0,
            skin: 0,
            caterpillar: Caterpillar::new(center, Direction::Right, 1),
            food: None,
            items: Vec::new(),
            obstacles: Vec::new(),
            moving_obstacles: Vec::new(),
            score: 0,
            combo: 0,
            last_food_ms: None,
            effects: ActiveEffects::default(),
            clock: GameClock::default(),
            time_ticks: 0,
        }
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.config.levels.get(self.level_index)
    }

    /// Lay out a level: obstacles, fresh caterpillar, cleared items, new food.
    ///
    /// Score and skin carry over. `index` must be in range.
    pub(crate) fn load_level(&mut self, index: usize) {
        let level = &self.config.levels[index];
        log::info!("Loading level {} ({})", index, level.name);

        self.level_index = index;
        self.obstacles = level.obstacles.clone();
        self.moving_obstacles = level.moving_obstacles.clone();
        self.caterpillar = Caterpillar::new(level.start, level.start_direction, self.config.initial_length);
        self.items.clear();
        self.food = None;
        self.combo = 0;
        self.last_food_ms = None;
        self.effects = ActiveEffects::default();
        self.clock.resync();

        if !self.place_food() {
            log::warn!("No free cell for food on level {}", index);
        }
    }

    /// True if nothing occupies the cell and it is on the board
    pub fn is_cell_free(&self, pos: Position) -> bool {
        pos.in_bounds(self.config.grid_width, self.config.grid_height)
            && !self.caterpillar.contains(pos)
            && !self.obstacles.iter().any(|o| o.contains(pos))
            && !self
                .moving_obstacles
                .iter()
                .any(|m| m.covers_cell(pos, self.config.cell_size))
            && self.food != Some(pos)
            && !self.items.iter().any(|item| item.pos == pos)
    }

    /// Run the bounded placement sampler against the current board
    pub fn find_free_cell(&mut self) -> Option<Position> {
        let mut rng = self.rng_state.next_rng();
        place(
            &mut rng,
            self.config.grid_width,
            self.config.grid_height,
            self.config.tuning.placement_attempts,
            |pos| self.is_cell_free(pos),
        )
    }

    /// Place food if none is active. Returns false when placement ran out of
    /// attempts.
    pub fn place_food(&mut self) -> bool {
        if self.food.is_some() {
            return true;
        }
        self.food = self.find_free_cell();
        self.food.is_some()
    }

    /// Active timed item of the given kind
    pub fn item(&self, kind: ItemKind) -> Option<&TimedItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    /// Record a food pickup and return the updated combo count
    pub(crate) fn register_food(&mut self, now_ms: u64) -> u32 {
        let window = self.config.tuning.combo_window_ms;
        self.combo = match self.last_food_ms {
            Some(last) if now_ms.saturating_sub(last) <= window => self.combo + 1,
            _ => 1,
        };
        self.last_food_ms = Some(now_ms);
        self.combo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caterpillar_trails_behind_head() {
        let cat = Caterpillar::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(cat.len(), 3);
        assert_eq!(cat.head(), Position::new(5, 5));
        assert_eq!(cat.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_tail_cell_is_safe_unless_growing() {
        // Square loop: head at (1,0), tail at (1,1) right below it
        let cat = Caterpillar {
            body: VecDeque::from(vec![
                Position::new(1, 0),
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]),
            direction: Direction::Right,
        };
        assert!(!cat.bites_itself(Position::new(1, 1), false));
        assert!(cat.bites_itself(Position::new(1, 1), true));
        assert!(cat.bites_itself(Position::new(0, 1), false));
    }

    #[test]
    fn test_shrink_respects_minimum() {
        let mut cat = Caterpillar::new(Position::new(9, 0), Direction::Right, 5);
        assert_eq!(cat.shrink(2, 3), 2);
        assert_eq!(cat.len(), 3);
        assert_eq!(cat.shrink(2, 3), 0);
        assert_eq!(cat.len(), 3);

        let mut short = Caterpillar::new(Position::new(9, 0), Direction::Right, 4);
        assert_eq!(short.shrink(2, 3), 1);
    }

    #[test]
    fn test_multiplier_lapses_after_window() {
        let effects = ActiveEffects {
            multiplier: 3,
            multiplier_until_ms: Some(1_000),
            pending_growth: 0,
        };
        assert_eq!(effects.multiplier_at(1_000), 3);
        assert_eq!(effects.multiplier_at(1_001), 1);
        assert_eq!(ActiveEffects::default().multiplier_at(u64::MAX), 1);
    }

    #[test]
    fn test_clock_skips_gap_after_resync() {
        let mut clock = GameClock::default();
        assert_eq!(clock.advance(10_000, 150), 150);
        assert_eq!(clock.advance(10_150, 150), 300);

        clock.resync();
        // A long pause on the caller side only costs one nominal interval
        assert_eq!(clock.advance(60_000, 150), 450);
        assert_eq!(clock.advance(60_100, 150), 550);
    }

    #[test]
    fn test_rng_streams_differ() {
        use rand::Rng;
        let mut state = RngState::new(42);
        let a: u32 = state.next_rng().random();
        let b: u32 = state.next_rng().random();
        assert_ne!(a, b);
        assert_eq!(state.stream, 2);

        let mut replay = RngState::new(42);
        let a2: u32 = replay.next_rng().random();
        assert_eq!(a, a2);
    }

    #[test]
    fn test_combo_window() {
        let mut state = GameState::new(GameConfig::default(), 1);
        assert_eq!(state.register_food(1_000), 1);
        assert_eq!(state.register_food(3_000), 2);
        assert_eq!(state.register_food(6_000), 3);
        assert_eq!(state.register_food(9_001), 1);
    }
}
