//! Track entities
//!
//! Obstacles and rivals are plain values owned by the run's live set.

use serde::Serialize;

use super::catalog::{ObstacleProfile, RivalProfile};

/// Cause reported when the colliding entity has no display name
pub const UNKNOWN_CAUSE: &str = "Unknown";

/// What kind of thing is on the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EntityKind {
    /// Static relative to the track, scrolls at full track speed
    Obstacle(&'static ObstacleProfile),
    /// Racing alongside; `relative_speed` is always positive
    Rival {
        profile: &'static RivalProfile,
        relative_speed: f64,
    },
}

/// A spawned obstacle or rival
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub lane: usize,
    /// Progress down the track (spawn edge near 0, grows toward the player)
    pub position: f64,
}

impl Entity {
    /// Spawn an obstacle from a catalog entry
    pub fn obstacle(
        id: u32,
        profile: &'static ObstacleProfile,
        lane: usize,
        position: f64,
    ) -> Self {
        Self {
            id,
            kind: EntityKind::Obstacle(profile),
            lane,
            position,
        }
    }

    /// Spawn a rival. Non-positive relative speeds are a caller bug; they are
    /// nudged up so the "rivals always lag the track" invariant holds.
    pub fn rival(
        id: u32,
        profile: &'static RivalProfile,
        relative_speed: f64,
        lane: usize,
        position: f64,
    ) -> Self {
        debug_assert!(relative_speed > 0.0);
        Self {
            id,
            kind: EntityKind::Rival {
                profile,
                relative_speed: relative_speed.max(f64::EPSILON),
            },
            lane,
            position,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self.kind {
            EntityKind::Obstacle(profile) => profile.name,
            EntityKind::Rival { profile, .. } => profile.name,
        }
    }

    /// Name used as the run's cause of death
    pub fn cause(&self) -> &'static str {
        let name = self.name();
        if name.trim().is_empty() { UNKNOWN_CAUSE } else { name }
    }

    /// Speed relative to the track (0 for obstacles)
    pub fn relative_speed(&self) -> f64 {
        match self.kind {
            EntityKind::Obstacle(_) => 0.0,
            EntityKind::Rival { relative_speed, .. } => relative_speed,
        }
    }

    pub fn is_rival(&self) -> bool {
        matches!(self.kind, EntityKind::Rival { .. })
    }

    /// Distance this entity moves in one tick at the given track speed
    pub fn step_distance(&self, track_speed: f64, rival_damping: f64) -> f64 {
        track_speed - self.relative_speed() * rival_damping
    }
}
