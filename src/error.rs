//! Error types
//!
//! The tick loop itself is infallible. Errors only come from configuration
//! (caught at startup), the flavor-text collaborator (swallowed at the
//! boundary) and the best-score store.

use thiserror::Error;

/// Invalid tuning or catalog data. Fatal at initialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("lane count must be at least 1")]
    NoLanes,
    #[error("{0} catalog is empty")]
    EmptyCatalog(&'static str),
    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("rival probability must be within [0, 1], got {0}")]
    RivalProbability(f64),
    #[error("spawn interval floor ({floor}ms) exceeds base interval ({base}ms)")]
    SpawnFloorAboveBase { floor: f64, base: f64 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("rival speed range [{min}, {max}) is empty")]
    RivalSpeedRange { min: f64, max: f64 },
    #[error("exit threshold {exit} must lie beyond spawn position {spawn}")]
    ExitBeforeSpawn { exit: f64, spawn: f64 },
    #[error("max track speed {max} is below the initial speed {initial}")]
    MaxSpeedBelowInitial { max: f64, initial: f64 },
    #[error(
        "rivals at relative speed {rival_speed_max} with damping {rival_damping} would outrun \
         the initial track speed {initial_track_speed}"
    )]
    RivalsDriftBackward {
        rival_speed_max: f64,
        rival_damping: f64,
        initial_track_speed: f64,
    },
    #[error("hitbox margin {margin} leaves nothing of a {band_height} band")]
    MarginSwallowsBand { margin: f64, band_height: f64 },
    #[error("live entity ceiling must be at least 1")]
    NoEntityCapacity,
}

/// Flavor-text collaborator failure. Never reaches the simulation.
#[derive(Debug, Error)]
pub enum FlavorError {
    #[error("flavor text service unavailable: {0}")]
    Unavailable(String),
    #[error("flavor text request timed out")]
    TimedOut,
    #[error("flavor text worker disconnected")]
    Disconnected,
}

/// Best-score persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("best score I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("best score file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
