//! Spawn controller
//!
//! At most one entity per tick. The gap between spawns shrinks as the track
//! speeds up, down to a fixed floor.

use super::catalog::{OBSTACLES, RIVALS};
use super::entity::Entity;
use super::rng::RandomSource;
use super::state::RunSession;
use crate::tuning::Tuning;

/// Whether enough time has passed since the last spawn
pub fn spawn_due(tuning: &Tuning, now_ms: f64, track_speed: f64, last_spawn_ms: f64) -> bool {
    now_ms - last_spawn_ms > tuning.spawn_interval_ms(track_speed)
}

/// Roll a new entity: lane, then kind, then catalog entry (and rival speed).
/// The draw order is fixed so scripted sources produce exact spawns.
pub fn roll_entity(id: u32, tuning: &Tuning, rng: &mut impl RandomSource) -> Entity {
    let lane = rng.pick_index(tuning.lane_count);
    let is_rival = rng.next_in_range(0.0, 1.0) < tuning.rival_probability;

    if is_rival {
        let profile = &RIVALS[rng.pick_index(RIVALS.len())];
        let relative_speed = rng.next_in_range(tuning.rival_speed_min, tuning.rival_speed_max);
        Entity::rival(id, profile, relative_speed, lane, tuning.rival_spawn_position)
    } else {
        let profile = &OBSTACLES[rng.pick_index(OBSTACLES.len())];
        Entity::obstacle(id, profile, lane, tuning.obstacle_spawn_position)
    }
}

/// Spawn one entity into the session if the interval has elapsed.
/// Returns the new entity's ID.
pub fn maybe_spawn(
    session: &mut RunSession,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Option<u32> {
    let now = session.elapsed_ms;
    if !spawn_due(tuning, now, session.player.track_speed, session.last_spawn_ms) {
        return None;
    }

    // Removal normally keeps the set small; this only trips if it stops working
    if session.entities.len() >= tuning.max_live_entities {
        log::warn!(
            "Live entity ceiling reached ({}), skipping spawn",
            session.entities.len()
        );
        session.last_spawn_ms = now;
        return None;
    }

    let id = session.next_entity_id();
    let entity = roll_entity(id, tuning, rng);
    log::debug!(
        "Spawned #{} {} in lane {} at t={:.0}ms",
        entity.id,
        entity.name(),
        entity.lane,
        now
    );
    session.entities.push(entity);
    session.last_spawn_ms = now;
    Some(id)
}
