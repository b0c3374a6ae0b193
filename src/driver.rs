//! Fixed-rate driver
//!
//! The simulation has no timers of its own. A frontend calls `Driver::update`
//! once per frame with the frame's duration; the driver runs as many ticks as
//! the current level's interval allows and hands the events to observers.

use crate::consts::MAX_SUBSTEPS;
use crate::error::SimError;
use crate::sim::{Direction, GameEvent, GamePhase, GameState, TickInput, tick, tick_interval_ms};

/// Longest frame gap honoured in one update (tab switches, debugger stops)
pub const MAX_FRAME_MS: u64 = 250;

/// Observer of tick events (audio, HUD, achievements)
pub trait EventSink {
    fn on_event(&mut self, state: &GameState, event: &GameEvent);
}

/// Owns the game state and feeds it ticks at the level's pace
pub struct Driver {
    state: GameState,
    accumulator_ms: u64,
    /// Time handed to `tick`, advanced one interval per tick
    clock_ms: u64,
    pending: Option<Direction>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl Driver {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator_ms: 0,
            clock_ms: 0,
            pending: None,
            sinks: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for lifecycle commands (start, reset, skin)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Buffer a heading for the next tick. Later calls replace earlier ones;
    /// an immediate reversal of the current heading is dropped here already.
    pub fn steer(&mut self, direction: Direction) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        if direction != self.state.caterpillar.direction.opposite() {
            self.pending = Some(direction);
        }
    }

    pub fn pause(&mut self) -> Result<(), SimError> {
        self.state.pause()?;
        self.accumulator_ms = 0;
        self.pending = None;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SimError> {
        self.state.resume()
    }

    /// Toggle between Running and Paused (space / P key)
    pub fn toggle_pause(&mut self) -> Result<(), SimError> {
        match self.state.phase {
            GamePhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Run ticks for a frame of `frame_ms`. Returns every event produced.
    pub fn update(&mut self, frame_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.phase != GamePhase::Running {
            // No catch-up burst after a pause or game over
            self.accumulator_ms = 0;
            return events;
        }

        self.accumulator_ms += frame_ms.min(MAX_FRAME_MS);

        let mut substeps = 0;
        loop {
            let interval = tick_interval_ms(&self.state).max(1);
            if self.accumulator_ms < interval || substeps >= MAX_SUBSTEPS {
                break;
            }
            self.accumulator_ms -= interval;
            self.clock_ms += interval;
            substeps += 1;

            let input = TickInput {
                direction: self.pending.take(),
            };
            let tick_events = tick(&mut self.state, &input, self.clock_ms);
            for event in &tick_events {
                for sink in &mut self.sinks {
                    sink.on_event(&self.state, event);
                }
            }
            events.extend(tick_events);

            if self.state.phase != GamePhase::Running {
                self.accumulator_ms = 0;
                break;
            }
        }

        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator_ms = self.accumulator_ms.min(tick_interval_ms(&self.state));
        }
        events
    }
}
