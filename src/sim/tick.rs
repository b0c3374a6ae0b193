//! Fixed-step simulation tick
//!
//! Core game loop that advances the simulation deterministically. The step
//! order matters for tie-breaks:
//! 1. resolve heading, 2. compute new head, 3. terminal collisions,
//! 4. item pickups, 5. body update, 6. moving obstacles, 7. expiry,
//! 8. placement and spawning, 9. level advance.

use rand::Rng;

use super::collision::{CollisionScene, terminal_collision};
use super::grid::Direction;
use super::items::{ItemKind, PlacementTarget, TimedItem};
use super::obstacle::MovingObstacle;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::BASE_TICK_MS;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Direction buffered since the previous tick (None keeps the heading)
    pub direction: Option<Direction>,
}

impl From<Direction> for TickInput {
    fn from(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
        }
    }
}

/// Advance the game by one tick at caller time `now_ms`.
///
/// Does nothing unless the game is running. Returns the events of this tick
/// in the order they happened.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Running {
        return events;
    }
    let Some(level) = state.current_level() else {
        log::warn!("Running with no level {}, ignoring tick", state.level_index);
        return events;
    };
    let nominal_ms = level.tick_ms();
    let food_points = level.food_points;
    let threshold = level.score_threshold;

    let now = state.clock.advance(now_ms, nominal_ms);
    state.time_ticks += 1;

    // Heading and new head
    let direction = state.caterpillar.direction.resolve(input.direction);
    let new_head = state.caterpillar.head().step(direction);

    // Obstacles move this tick too; collide against where they end up
    let advanced: Vec<MovingObstacle> = state.moving_obstacles.iter().map(MovingObstacle::advanced).collect();

    let eats_food = state.food == Some(new_head);
    // Items past their expiry are gone even before step 7 sweeps them
    let item_hit = state
        .items
        .iter()
        .position(|item| item.pos == new_head && !item.is_expired(now));
    let hits_bonus = item_hit.is_some_and(|i| state.items[i].kind == ItemKind::Bonus);
    let growing = eats_food || hits_bonus || state.effects.pending_growth > 0;

    let scene = CollisionScene {
        width: state.config.grid_width,
        height: state.config.grid_height,
        cell_size: state.config.cell_size,
        caterpillar: &state.caterpillar,
        obstacles: &state.obstacles,
        moving: &advanced,
    };
    if let Some(reason) = terminal_collision(&scene, new_head, growing) {
        log::info!("Game over at {:?}: {:?} (score {})", new_head, reason, state.score);
        state.phase = GamePhase::Over;
        events.push(GameEvent::GameOver { reason });
        return events;
    }

    state.caterpillar.direction = direction;

    // Pickups
    let tuning = state.config.tuning.clone();
    let mut grow_now = false;
    if eats_food {
        grow_now = true;
        state.food = None;
        let combo = state.register_food(now);
        let multiplier = combo.min(tuning.max_combo_multiplier.max(1)) * state.effects.multiplier_at(now);
        state.score = state.score.saturating_add(food_points * u64::from(multiplier));
        events.push(GameEvent::FoodEaten {
            score: state.score,
            combo,
        });
    }

    if let Some(index) = item_hit {
        let item = state.items.remove(index);
        log::debug!("Collected {:?} at {:?}", item.kind, item.pos);
        match item.kind {
            ItemKind::Bonus => {
                state.effects.pending_growth += tuning.bonus_segments;
                state.score = state.score.saturating_add(tuning.bonus_points);
                events.push(GameEvent::BonusCollected { score: state.score });
            }
            ItemKind::Poison => {
                state.score = state.score.saturating_sub(tuning.poison_penalty);
                let removed = state.caterpillar.shrink(tuning.poison_shrink, tuning.min_length);
                events.push(GameEvent::PoisonCollected {
                    score: state.score,
                    removed,
                });
            }
            ItemKind::PowerUp => {
                let until_ms = now.saturating_add(tuning.power_up_duration_ms);
                state.effects.multiplier = tuning.power_up_multiplier.max(1);
                state.effects.multiplier_until_ms = Some(until_ms);
                events.push(GameEvent::PowerUpCollected {
                    multiplier: state.effects.multiplier,
                    until_ms,
                });
            }
        }
    }

    // Body: food growth takes precedence, owed bonus segments wait
    let grow_now = grow_now || state.effects.take_growth();
    state.caterpillar.advance(new_head, grow_now);

    state.moving_obstacles = advanced;

    // Expiry
    state.items.retain(|item| {
        if item.is_expired(now) {
            log::debug!("{:?} expired at {:?}", item.kind, item.pos);
            events.push(GameEvent::ItemExpired { kind: item.kind });
            false
        } else {
            true
        }
    });
    if state.effects.multiplier_until_ms.is_some_and(|until| now > until) {
        state.effects.multiplier = 1;
        state.effects.multiplier_until_ms = None;
        events.push(GameEvent::PowerUpEnded);
    }

    // Placement: food first, then random timed items
    if state.food.is_none() && !state.place_food() && eats_food {
        log::warn!("Food placement exhausted, retrying next tick");
        events.push(GameEvent::PlacementExhausted {
            target: PlacementTarget::Food,
        });
    }
    spawn_items(state, now, &mut events);

    // Level advance
    let next = state.level_index + 1;
    if state.score >= threshold && next < state.config.levels.len() {
        let completed = state.level_index;
        log::info!("Level {} complete with score {}", completed, state.score);
        state.load_level(next);
        events.push(GameEvent::LevelComplete { completed, next });
    }

    events
}

/// Roll for each timed item kind that is not on the board
fn spawn_items(state: &mut GameState, now: u64, events: &mut Vec<GameEvent>) {
    let chance = state.config.tuning.item_spawn_chance;
    if chance <= 0.0 {
        return;
    }

    let mut rng = state.rng_state.next_rng();
    for kind in ItemKind::ALL {
        if state.item(kind).is_some() || !rng.random_bool(chance) {
            continue;
        }
        match state.find_free_cell() {
            Some(pos) => {
                let lifetime = state.config.tuning.lifetime_ms(kind);
                state.items.push(TimedItem::new(kind, pos, now, lifetime));
                log::debug!("Spawned {:?} at {:?}", kind, pos);
                events.push(GameEvent::ItemSpawned { kind, pos });
            }
            None => {
                log::debug!("No free cell for {:?}", kind);
                events.push(GameEvent::PlacementExhausted {
                    target: PlacementTarget::Item(kind),
                });
            }
        }
    }
}

/// Nominal tick interval for the current level
pub fn tick_interval_ms(state: &GameState) -> u64 {
    state.current_level().map_or(BASE_TICK_MS, |level| level.tick_ms())
}
