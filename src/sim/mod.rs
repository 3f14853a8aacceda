//! Simulation module
//!
//! All gameplay logic lives here. No rendering, input devices or I/O:
//! - Fixed timestep only
//! - Randomness through an injected source
//! - Stable iteration order (live set kept in spawn order)

pub mod autopilot;
pub mod catalog;
pub mod collision;
pub mod entity;
pub mod motion;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catalog::{OBSTACLES, ObstacleProfile, RIVALS, RivalProfile};
pub use collision::{Band, CollisionResult, find_collision};
pub use entity::{Entity, EntityKind, UNKNOWN_CAUSE};
pub use rng::{RandomSource, ScriptedRandom};
pub use state::{PlayerState, RunPhase, RunResult, RunSession};
pub use tick::{Crash, TickReport, player_band, tick};
