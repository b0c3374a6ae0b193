use std::collections::VecDeque;

use caterpillar_core::GameConfig;
use caterpillar_core::sim::{
    Axis, Direction, GameEvent, GameOverReason, GamePhase, GameState, GridRect, ItemKind, MovingObstacle, Position,
    TickInput, TimedItem, tick,
};
use glam::Vec2;

fn body(cells: &[(i32, i32)]) -> VecDeque<Position> {
    cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
}

/// Running game on an open board with no random items
fn open_game(width: u32, height: u32, start: Position) -> GameState {
    let mut config = GameConfig::open_field(width, height, start);
    config.tuning.item_spawn_chance = 0.0;
    let mut state = GameState::new(config, 2024);
    state.start(0).expect("level 0");
    state
}

#[test]
fn three_ticks_right_keep_length() {
    let mut state = open_game(10, 10, Position::new(4, 2));
    state.caterpillar.body = body(&[(4, 2), (3, 2), (2, 2), (2, 1), (2, 0)]);
    state.food = Some(Position::new(0, 9));

    let mut heads = Vec::new();
    for i in 0..3 {
        let events = tick(&mut state, &Direction::Right.into(), i * 150);
        assert!(events.is_empty());
        heads.push(state.caterpillar.head());
    }

    assert_eq!(heads, vec![Position::new(5, 2), Position::new(6, 2), Position::new(7, 2)]);
    assert_eq!(state.caterpillar.len(), 5);
}

#[test]
fn eating_food_grows_and_respawns_elsewhere() {
    let mut state = open_game(10, 10, Position::new(5, 2));
    state.caterpillar.body = body(&[(5, 2), (4, 2), (3, 2), (2, 2), (2, 1)]);
    state.food = Some(Position::new(6, 2));

    let events = tick(&mut state, &TickInput::default(), 0);

    assert!(matches!(events[..], [GameEvent::FoodEaten { combo: 1, .. }]));
    assert_eq!(state.caterpillar.len(), 6);
    let food = state.food.expect("new food placed");
    assert!(!state.caterpillar.contains(food));
}

#[test]
fn leaving_the_board_ends_the_run() {
    let mut state = open_game(10, 10, Position::new(4, 2));
    state.caterpillar.body = body(&[(0, 2), (1, 2), (2, 2)]);
    state.caterpillar.direction = Direction::Left;
    state.food = Some(Position::new(9, 9));

    let events = tick(&mut state, &TickInput::default(), 0);

    assert_eq!(
        events,
        vec![GameEvent::GameOver {
            reason: GameOverReason::OutOfBounds
        }]
    );
    assert_eq!(state.phase, GamePhase::Over);

    state.reset().unwrap();
    assert_eq!(state.phase, GamePhase::Ready);
}

#[test]
fn hitting_static_and_moving_obstacles() {
    let mut config = GameConfig::open_field(30, 30, Position::new(10, 10));
    config.tuning.item_spawn_chance = 0.0;
    config.levels[0].obstacles.push(GridRect::new(12, 10, 1, 1));
    let mut state = GameState::new(config, 1);
    state.start(0).unwrap();
    state.food = Some(Position::new(0, 0));

    tick(&mut state, &TickInput::default(), 0);
    let events = tick(&mut state, &TickInput::default(), 150);
    assert_eq!(
        events,
        vec![GameEvent::GameOver {
            reason: GameOverReason::StaticObstacle
        }]
    );

    // Obstacle slides into the head's next cell during the same tick
    let mut config = GameConfig::open_field(30, 30, Position::new(10, 10));
    config.tuning.item_spawn_chance = 0.0;
    config.levels[0].moving_obstacles.push(MovingObstacle {
        pos: Vec2::new(240.0, 160.0),
        size: Vec2::new(20.0, 20.0),
        axis: Axis::Y,
        speed: 20.0,
        direction: 1.0,
        range: [0.0, 580.0],
    });
    let mut state = GameState::new(config, 1);
    state.start(0).unwrap();
    state.food = Some(Position::new(0, 0));

    // Head goes to (11,10) while the obstacle in column 12 drops from row 8 to 9
    assert!(tick(&mut state, &TickInput::default(), 0).is_empty());
    // Head enters (12,10) on the same tick the obstacle drops into row 10
    let events = tick(&mut state, &TickInput::default(), 150);
    assert_eq!(
        events,
        vec![GameEvent::GameOver {
            reason: GameOverReason::MovingObstacle
        }]
    );
}

#[test]
fn patrol_flips_on_the_tick_it_reaches_the_bound() {
    let mut config = GameConfig::open_field(30, 30, Position::new(20, 20));
    config.initial_length = 3;
    config.tuning.item_spawn_chance = 0.0;
    config.levels[0].moving_obstacles.push(MovingObstacle {
        pos: Vec2::new(100.0, 100.0),
        size: Vec2::new(40.0, 20.0),
        axis: Axis::X,
        speed: 2.0,
        direction: 1.0,
        range: [100.0, 400.0],
    });
    let mut state = GameState::new(config, 9);
    state.start(0).unwrap();
    state.food = Some(Position::new(0, 29));

    // Circle a 2x2 square, always chasing the tail
    let lap = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];
    for i in 0..150u64 {
        let before = state.moving_obstacles[0].clone();
        let events = tick(&mut state, &lap[i as usize % 4].into(), i * 150);
        assert!(events.is_empty(), "tick {}: {:?}", i, events);

        let after = &state.moving_obstacles[0];
        if i < 149 {
            assert_eq!(after.direction, 1.0);
        } else {
            assert_eq!(before.pos.x, 398.0);
            assert_eq!(after.pos.x, 400.0);
            assert_eq!(after.direction, -1.0);
        }
    }
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.caterpillar.len(), 3);
}

#[test]
fn pause_does_not_age_timed_items() {
    let mut state = open_game(30, 30, Position::new(5, 5));
    state.food = Some(Position::new(0, 29));

    tick(&mut state, &TickInput::default(), 1_000);
    let born = state.clock.now_ms;
    state.items.push(TimedItem::new(ItemKind::Bonus, Position::new(29, 0), born, 500));

    state.pause().unwrap();
    assert!(tick(&mut state, &TickInput::default(), 50_000).is_empty());
    state.resume().unwrap();

    // Ten minutes of wall time later
    let events = tick(&mut state, &TickInput::default(), 601_000);
    assert!(events.is_empty());
    assert_eq!(state.clock.now_ms, born + 150);
    assert_eq!(state.items.len(), 1);

    let mut expired_at = None;
    for i in 1..10 {
        let events = tick(&mut state, &TickInput::default(), 601_000 + i * 150);
        if events.contains(&GameEvent::ItemExpired { kind: ItemKind::Bonus }) {
            expired_at = Some(state.clock.now_ms);
            break;
        }
    }
    assert_eq!(expired_at, Some(born + 600));
}

#[test]
fn restart_keeps_skin_and_resets_score() {
    let mut state = GameState::new(GameConfig::default(), 11);
    state.select_skin(1, 75).unwrap();
    state.start(2).unwrap();
    state.score = 400;
    state.pause().unwrap();
    state.reset().unwrap();

    assert_eq!(state.skin, 1);
    assert_eq!(state.score, 0);
    state.start(0).unwrap();
    assert_eq!(state.level_index, 0);
    assert!(state.food.is_some());
}
