//! Error types
//!
//! Only lifecycle calls can fail. Collisions and placement exhaustion during a
//! tick are ordinary gameplay and are reported as events instead.

use thiserror::Error;

use crate::sim::GamePhase;

/// Bad level/skin selection or an invalid configuration file
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("level index {index} out of range ({count} levels)")]
    LevelOutOfRange { index: usize, count: usize },
    #[error("skin index {index} out of range ({count} skins)")]
    SkinOutOfRange { index: usize, count: usize },
    #[error("skin {name} is locked (needs {price}, best score {high_score})")]
    SkinLocked {
        name: String,
        price: u64,
        high_score: u64,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Lifecycle command that was issued in the wrong phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the engine's lifecycle operations
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("cannot {command} while {from:?}")]
    InvalidTransition { from: GamePhase, command: Command },
}

impl SimError {
    /// True for errors the caller may log and ignore
    pub fn is_ignorable(&self) -> bool {
        matches!(self, SimError::InvalidTransition { .. })
    }
}
