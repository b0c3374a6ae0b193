//! Phase transitions driven by menu commands
//!
//! ```text
//! Ready --start--> Running --pause--> Paused --resume--> Running
//! Running --(terminal collision)--> Over --reset--> Ready
//! ```
//! Rejected commands leave the state untouched and return
//! `SimError::InvalidTransition`, which callers may log and ignore.

use super::grid::{Direction, Position};
use super::state::{ActiveEffects, Caterpillar, GameClock, GamePhase, GameState};
use crate::error::{Command, ConfigError, SimError};

impl GameState {
    fn reject(&self, command: Command) -> SimError {
        log::warn!("Ignoring {} while {:?}", command, self.phase);
        SimError::InvalidTransition {
            from: self.phase,
            command,
        }
    }

    /// Begin a run on the given level (Ready -> Running)
    pub fn start(&mut self, level_index: usize) -> Result<(), SimError> {
        if self.phase != GamePhase::Ready {
            return Err(self.reject(Command::Start));
        }
        let count = self.config.levels.len();
        if level_index >= count {
            return Err(ConfigError::LevelOutOfRange {
                index: level_index,
                count,
            }
            .into());
        }

        self.score = 0;
        self.time_ticks = 0;
        self.clock = GameClock::default();
        self.load_level(level_index);
        self.phase = GamePhase::Running;
        log::info!("Run started on level {} (seed {})", level_index, self.seed);
        Ok(())
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> Result<(), SimError> {
        if self.phase != GamePhase::Running {
            return Err(self.reject(Command::Pause));
        }
        self.phase = GamePhase::Paused;
        log::info!("Paused at game time {}ms", self.clock.now_ms);
        Ok(())
    }

    /// Paused -> Running. Wall time spent paused is not counted.
    pub fn resume(&mut self) -> Result<(), SimError> {
        if self.phase != GamePhase::Paused {
            return Err(self.reject(Command::Resume));
        }
        self.clock.resync();
        self.phase = GamePhase::Running;
        log::info!("Resumed");
        Ok(())
    }

    /// Back to Ready for a restart. Keeps the config, skin and RNG stream so
    /// the next run gets a fresh layout.
    pub fn reset(&mut self) -> Result<(), SimError> {
        if self.phase == GamePhase::Ready {
            return Err(self.reject(Command::Reset));
        }
        let center = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        self.phase = GamePhase::Ready;
        self.level_index = 0;
        self.caterpillar = Caterpillar::new(center, Direction::Right, 1);
        self.food = None;
        self.items.clear();
        self.obstacles.clear();
        self.moving_obstacles.clear();
        self.score = 0;
        self.combo = 0;
        self.last_food_ms = None;
        self.effects = ActiveEffects::default();
        self.clock = GameClock::default();
        self.time_ticks = 0;
        log::info!("Reset to ready");
        Ok(())
    }

    /// Pick a skin the given best score has unlocked
    pub fn select_skin(&mut self, index: usize, high_score: u64) -> Result<(), SimError> {
        let count = self.config.skins.len();
        let skin = self
            .config
            .skins
            .get(index)
            .ok_or(ConfigError::SkinOutOfRange { index, count })?;
        if !skin.is_unlocked(high_score) {
            return Err(ConfigError::SkinLocked {
                name: skin.name.clone(),
                price: skin.price,
                high_score,
            }
            .into());
        }
        self.skin = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::error::{Command, ConfigError, SimError};
    use crate::sim::state::{GamePhase, GameState};

    #[test]
    fn test_full_cycle() {
        let mut state = GameState::new(GameConfig::default(), 3);
        assert_eq!(state.phase, GamePhase::Ready);

        state.start(1).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.caterpillar.len(), 5);
        assert!(state.food.is_some());

        state.pause().unwrap();
        assert_eq!(state.phase, GamePhase::Paused);
        state.resume().unwrap();
        assert_eq!(state.phase, GamePhase::Running);

        state.reset().unwrap();
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_bad_level_index() {
        let mut state = GameState::new(GameConfig::default(), 3);
        assert_eq!(
            state.start(4),
            Err(SimError::Configuration(ConfigError::LevelOutOfRange { index: 4, count: 4 }))
        );
        assert_eq!(state.phase, GamePhase::Ready);
    }

    #[test]
    fn test_invalid_transitions_leave_phase() {
        let mut state = GameState::new(GameConfig::default(), 3);
        let err = state.resume().unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidTransition {
                from: GamePhase::Ready,
                command: Command::Resume
            }
        );
        assert!(err.is_ignorable());
        assert!(state.pause().is_err());
        assert!(state.reset().is_err());

        state.start(0).unwrap();
        assert!(state.start(0).is_err());
        assert!(state.resume().is_err());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_skin_selection() {
        let mut state = GameState::new(GameConfig::default(), 3);
        assert!(state.select_skin(2, 100).is_ok());
        assert_eq!(state.skin, 2);

        assert!(matches!(
            state.select_skin(4, 100),
            Err(SimError::Configuration(ConfigError::SkinLocked { .. }))
        ));
        assert!(matches!(
            state.select_skin(9, 10_000),
            Err(SimError::Configuration(ConfigError::SkinOutOfRange { index: 9, count: 5 }))
        ));
        assert_eq!(state.skin, 2);

        // Skin survives a restart
        state.start(0).unwrap();
        state.reset().unwrap();
        assert_eq!(state.skin, 2);
    }
}
