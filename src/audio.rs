//! Sound cue selection
//!
//! Maps simulation events to the cues a platform audio player should fire.
//! Playback itself (Web Audio, rodio, ...) lives outside the crate.

use crate::driver::EventSink;
use crate::sim::{GameEvent, GameOverReason, GameState, ItemKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Leaf eaten
    Munch,
    /// Leaf eaten while a combo is running
    ComboMunch,
    /// Bonus fruit collected
    BonusCollect,
    /// Poison fruit collected
    PoisonCollect,
    /// Power-up collected
    PowerUp,
    /// Power-up wore off
    PowerDown,
    /// A timed item disappeared uncollected
    ItemFade,
    /// Ran into a wall or obstacle
    Crash,
    /// Bit its own body
    SelfBite,
    /// Level cleared
    LevelClear,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let cue = match event {
            GameEvent::FoodEaten { combo, .. } if *combo > 1 => SoundEffect::ComboMunch,
            GameEvent::FoodEaten { .. } => SoundEffect::Munch,
            GameEvent::BonusCollected { .. } => SoundEffect::BonusCollect,
            GameEvent::PoisonCollected { .. } => SoundEffect::PoisonCollect,
            GameEvent::PowerUpCollected { .. } => SoundEffect::PowerUp,
            GameEvent::PowerUpEnded => SoundEffect::PowerDown,
            GameEvent::ItemExpired {
                kind: ItemKind::Bonus | ItemKind::PowerUp,
            } => SoundEffect::ItemFade,
            GameEvent::GameOver {
                reason: GameOverReason::SelfCollision,
            } => SoundEffect::SelfBite,
            GameEvent::GameOver { .. } => SoundEffect::Crash,
            GameEvent::LevelComplete { .. } => SoundEffect::LevelClear,
            GameEvent::ItemExpired { .. } | GameEvent::ItemSpawned { .. } | GameEvent::PlacementExhausted { .. } => {
                return None;
            }
        };
        Some(cue)
    }
}

/// Event sink that queues cues for the platform audio player to drain
#[derive(Debug, Default)]
pub struct CueQueue {
    pub muted: bool,
    queue: Vec<SoundEffect>,
}

impl CueQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all cues queued since the last drain
    pub fn drain(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.queue)
    }
}

impl EventSink for CueQueue {
    fn on_event(&mut self, _state: &GameState, event: &GameEvent) {
        if self.muted {
            return;
        }
        if let Some(cue) = SoundEffect::for_event(event) {
            self.queue.push(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_combo_gets_its_own_cue() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::FoodEaten { score: 10, combo: 1 }),
            Some(SoundEffect::Munch)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::FoodEaten { score: 30, combo: 2 }),
            Some(SoundEffect::ComboMunch)
        );
    }

    #[test]
    fn test_poison_fading_is_silent() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ItemExpired { kind: ItemKind::Poison }),
            None
        );
    }

    #[test]
    fn test_queue_respects_mute() {
        let state = GameState::new(GameConfig::default(), 0);
        let mut queue = CueQueue::new();
        queue.on_event(&state, &GameEvent::PowerUpEnded);
        queue.muted = true;
        queue.on_event(&state, &GameEvent::LevelComplete { completed: 0, next: 1 });
        assert_eq!(queue.drain(), vec![SoundEffect::PowerDown]);
        assert!(queue.drain().is_empty());
    }
}
