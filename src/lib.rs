//! Lane Runner - A lane-based endless runner arcade simulation
//!
//! Core modules:
//! - `sim`: Simulation (spawning, motion, collisions, run session state)
//! - `game`: Run state machine and per-frame tick driver
//! - `input`: Lane-change command boundary
//! - `flavor`: Best-effort flavor-text collaborator (taunts, commentary)
//! - `highscores`: Best score store
//! - `settings` / `tuning`: Preferences and data-driven game balance

pub mod error;
pub mod flavor;
pub mod game;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, FlavorError, StoreError};
pub use game::{Game, GameEvent, RunPhase, StepOutcome};
pub use highscores::{BestScoreStore, HighScores, MemoryStore};
pub use input::LaneControl;
pub use settings::Settings;
pub use tuning::Tuning;

/// Simulation timing constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap we integrate (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Display speed scale for the HUD (track speed 1.0 reads as 120 km/h)
    pub const KMH_PER_SPEED_UNIT: f64 = 120.0;
}

/// Score as shown to the player (rounded down, never negative)
#[inline]
pub fn display_score(score: f64) -> u64 {
    if score.is_finite() && score > 0.0 {
        score.floor() as u64
    } else {
        0
    }
}

/// Track speed converted to the HUD's km/h readout
#[inline]
pub fn display_speed_kmh(track_speed: f64) -> u32 {
    (track_speed * consts::KMH_PER_SPEED_UNIT).max(0.0).floor() as u32
}
