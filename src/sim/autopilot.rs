//! Demo autopilot
//!
//! Attract-mode driver: looks at what is coming down each neighbouring lane
//! and steers toward whichever has the most room. Deliberately greedy, so it
//! still crashes eventually.

use super::state::RunSession;
use crate::tuning::Tuning;

/// Headroom above which the autopilot stays put
pub const SAFE_HEADROOM: f64 = 30.0;

/// Distance from the player's band to the nearest incoming entity in `lane`
/// (negative when something already overlaps it, infinite when clear)
pub fn lane_headroom(session: &RunSession, tuning: &Tuning, lane: usize) -> f64 {
    let player_end = tuning.player_band_start + tuning.band_height;
    session
        .entities
        .iter()
        .filter(|e| e.lane == lane && e.position < player_end)
        .map(|e| tuning.player_band_start - (e.position + tuning.band_height))
        .fold(f64::INFINITY, f64::min)
}

/// Lane change (`-1`/`+1`) the autopilot wants for a player in `lane`, if any
pub fn choose_direction(session: &RunSession, tuning: &Tuning, lane: usize) -> Option<i32> {
    let here = lane_headroom(session, tuning, lane);
    if here > SAFE_HEADROOM {
        return None;
    }

    let mut best = (0, here);
    if lane > 0 {
        let left = lane_headroom(session, tuning, lane - 1);
        if left > best.1 {
            best = (-1, left);
        }
    }
    if lane + 1 < tuning.lane_count {
        let right = lane_headroom(session, tuning, lane + 1);
        if right > best.1 {
            best = (1, right);
        }
    }
    (best.0 != 0).then_some(best.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::OBSTACLES;
    use crate::sim::entity::Entity;

    fn session(entities: Vec<Entity>) -> (RunSession, Tuning) {
        let tuning = Tuning::default();
        let mut session = RunSession::new(&tuning);
        session.entities = entities;
        (session, tuning)
    }

    #[test]
    fn test_clear_lane_stays() {
        let (session, tuning) = session(vec![Entity::obstacle(1, &OBSTACLES[0], 0, 70.0)]);
        assert_eq!(lane_headroom(&session, &tuning, 1), f64::INFINITY);
        assert_eq!(choose_direction(&session, &tuning, 1), None);
    }

    #[test]
    fn test_dodges_toward_open_lane() {
        let (session, tuning) = session(vec![
            Entity::obstacle(1, &OBSTACLES[0], 1, 60.0),
            Entity::obstacle(2, &OBSTACLES[1], 0, 55.0),
        ]);
        // lane 0 is only slightly better, lane 2 is empty
        assert_eq!(choose_direction(&session, &tuning, 1), Some(1));
    }

    #[test]
    fn test_passed_entities_are_ignored() {
        let (session, tuning) = session(vec![Entity::obstacle(1, &OBSTACLES[0], 1, 95.0)]);
        assert_eq!(choose_direction(&session, &tuning, 1), None);
    }
}
