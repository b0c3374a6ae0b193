//! Caterpillar headless demo
//!
//! Runs the simulation at 60 frames per second of virtual time with a greedy
//! autopilot steering toward the food, and logs what happens.
//!
//! Usage: `caterpillar-demo [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use caterpillar_core::audio::SoundEffect;
    use caterpillar_core::sim::{CollisionScene, Direction, GamePhase, GameState, MovingObstacle, terminal_collision};
    use caterpillar_core::{Driver, GameConfig, HighScores};

    /// 60 FPS frames
    const FRAME_MS: u64 = 16;
    /// Give up after ten virtual minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Pick the safe heading that gets closest to the food
    fn autopilot(state: &GameState) -> Option<Direction> {
        let head = state.caterpillar.head();
        let current = state.caterpillar.direction;
        let advanced: Vec<MovingObstacle> = state.moving_obstacles.iter().map(MovingObstacle::advanced).collect();
        let scene = CollisionScene {
            width: state.config.grid_width,
            height: state.config.grid_height,
            cell_size: state.config.cell_size,
            caterpillar: &state.caterpillar,
            obstacles: &state.obstacles,
            moving: &advanced,
        };

        Direction::ALL
            .into_iter()
            .filter(|&dir| dir != current.opposite())
            .filter(|&dir| terminal_collision(&scene, head.step(dir), true).is_none())
            .min_by_key(|&dir| {
                let next = head.step(dir);
                let distance = state.food.map_or(0, |food| next.manhattan(food));
                // Prefer going straight on ties
                (distance, dir != current)
            })
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => GameConfig::from_json(&std::fs::read_to_string(&path)?)?,
            None => GameConfig::default(),
        };
        let seed = match args.next() {
            Some(seed) => seed.parse()?,
            None => 42,
        };

        let mut state = GameState::new(config, seed);
        state.start(0)?;

        let mut driver = Driver::new(state);

        let mut frames = 0;
        while frames < MAX_FRAMES && driver.state().phase == GamePhase::Running {
            if let Some(dir) = autopilot(driver.state()) {
                driver.steer(dir);
            }
            for event in driver.update(FRAME_MS) {
                match SoundEffect::for_event(&event) {
                    Some(cue) => log::info!("{:?} [{:?}]", event, cue),
                    None => log::debug!("{:?}", event),
                }
            }
            frames += 1;
        }

        let state = driver.state();
        let mut high_scores = HighScores::new();
        let rank = high_scores.add_score(state.score, state.level_index, u64::from(frames) * FRAME_MS);

        let summary = serde_json::json!({
            "seed": state.seed,
            "phase": format!("{:?}", state.phase),
            "level": state.config.levels.get(state.level_index).map(|l| l.name.clone()),
            "score": state.score,
            "length": state.caterpillar.len(),
            "ticks": state.time_ticks,
            "rank": rank,
            "unlocked_skins": high_scores.unlocked_skins(&state.config.skins),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Caterpillar demo starting...");
    demo::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web frontend drives the library directly
}
