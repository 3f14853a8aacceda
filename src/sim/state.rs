//! Run session and core simulation types
//!
//! All mutable state of a single run lives in [`RunSession`]; the run state
//! machine owns it exclusively.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::tuning::Tuning;

/// Lifecycle of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No active run (title screen)
    Idle,
    /// Ticks are advancing
    Running,
    /// Run ended; result snapshot available
    Over,
}

/// Player progression counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerState {
    /// Lane observed at the start of the latest tick
    pub lane: usize,
    /// Real-valued score accumulator (displayed rounded down)
    pub score: f64,
    /// Global scroll speed, the difficulty driver
    pub track_speed: f64,
}

/// Final snapshot of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub final_score: u64,
    /// Display name of whatever the player hit
    pub cause: String,
    /// Track speed at the moment of impact
    pub top_speed: f64,
    /// Ticks survived (the crash tick included)
    pub ticks: u64,
    /// Simulated run time in ms
    pub elapsed_ms: f64,
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSession {
    pub player: PlayerState,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,
    /// Simulated clock (ms since the run started)
    pub elapsed_ms: f64,
    /// Simulated time of the latest spawn
    pub last_spawn_ms: f64,
    /// Simulation tick counter
    pub ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl RunSession {
    /// Fresh run: zero score, initial speed, center lane, empty track
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: PlayerState {
                lane: tuning.center_lane(),
                score: 0.0,
                track_speed: tuning.initial_track_speed,
            },
            entities: Vec::new(),
            elapsed_ms: 0.0,
            last_spawn_ms: 0.0,
            ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u64 {
        crate::display_score(self.player.score)
    }

    /// Freeze this run into a result
    pub fn finish(&self, cause: &str) -> RunResult {
        RunResult {
            final_score: self.display_score(),
            cause: cause.to_string(),
            top_speed: self.player.track_speed,
            ticks: self.ticks,
            elapsed_ms: self.elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_reset() {
        let tuning = Tuning::default();
        let session = RunSession::new(&tuning);
        assert_eq!(session.player.lane, 1);
        assert_eq!(session.player.score, 0.0);
        assert_eq!(session.player.track_speed, tuning.initial_track_speed);
        assert!(session.entities.is_empty());
        assert_eq!(session.ticks, 0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut session = RunSession::new(&Tuning::default());
        let a = session.next_entity_id();
        let b = session.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_finish_rounds_score_down() {
        let mut session = RunSession::new(&Tuning::default());
        session.player.score = 41.99;
        session.ticks = 12;
        let result = session.finish("Keytar");
        assert_eq!(result.final_score, 41);
        assert_eq!(result.cause, "Keytar");
        assert_eq!(result.ticks, 12);
    }
}
