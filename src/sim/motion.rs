//! Motion and progression
//!
//! The only code that touches track speed, score and entity positions.

use super::state::RunSession;
use crate::tuning::Tuning;

/// Ramp the track speed by one tick, honoring the optional ceiling.
/// Never lowers the speed, even if the ceiling is below the current value.
pub fn accelerate(track_speed: f64, tuning: &Tuning) -> f64 {
    let next = track_speed + tuning.accel_rate;
    match tuning.max_track_speed {
        Some(max) => next.min(max).max(track_speed),
        None => next,
    }
}

/// Advance speed, score and every live entity by one tick, then drop
/// entities that scrolled past the exit. Returns how many were removed.
pub fn advance(session: &mut RunSession, tuning: &Tuning) -> usize {
    let player = &mut session.player;
    player.track_speed = accelerate(player.track_speed, tuning);
    player.score += player.track_speed * tuning.score_rate;

    let speed = player.track_speed;
    for entity in &mut session.entities {
        entity.position += entity.step_distance(speed, tuning.rival_damping);
    }

    let before = session.entities.len();
    session.entities.retain(|e| e.position < tuning.exit_threshold);
    before - session.entities.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{OBSTACLES, RIVALS};
    use crate::sim::entity::Entity;

    fn session_with(entities: Vec<Entity>) -> (RunSession, Tuning) {
        let tuning = Tuning::default();
        let mut session = RunSession::new(&tuning);
        session.entities = entities;
        (session, tuning)
    }

    #[test]
    fn test_speed_and_score_progress() {
        let (mut session, tuning) = session_with(Vec::new());
        advance(&mut session, &tuning);
        let expected_speed = tuning.initial_track_speed + tuning.accel_rate;
        assert!((session.player.track_speed - expected_speed).abs() < 1e-12);
        assert!((session.player.score - expected_speed * tuning.score_rate).abs() < 1e-12);
    }

    #[test]
    fn test_fastest_rival_still_reaches_the_exit() {
        let top = Tuning::default().rival_speed_max;
        let (mut session, tuning) =
            session_with(vec![Entity::rival(1, &RIVALS[0], top, 0, -15.0)]);
        let mut last = -15.0;
        for _ in 0..1000 {
            if advance(&mut session, &tuning) == 1 {
                return;
            }
            let position = session.entities[0].position;
            assert!(position > last);
            last = position;
        }
        panic!("rival never left the track");
    }

    #[test]
    fn test_obstacles_and_rivals_move_differently() {
        let (mut session, tuning) = session_with(vec![
            Entity::obstacle(1, &OBSTACLES[0], 0, 0.0),
            Entity::rival(2, &RIVALS[0], 0.6, 1, 0.0),
        ]);
        advance(&mut session, &tuning);
        let speed = session.player.track_speed;
        assert!((session.entities[0].position - speed).abs() < 1e-12);
        assert!((session.entities[1].position - (speed - 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_entities_past_exit_are_removed() {
        let (mut session, tuning) = session_with(vec![
            Entity::obstacle(1, &OBSTACLES[0], 0, 119.5),
            Entity::obstacle(2, &OBSTACLES[1], 1, 50.0),
        ]);
        let removed = advance(&mut session, &tuning);
        assert_eq!(removed, 1);
        assert_eq!(session.entities.len(), 1);
        assert_eq!(session.entities[0].id, 2);

        // The removed entity never comes back
        for _ in 0..10 {
            advance(&mut session, &tuning);
            assert!(session.entities.iter().all(|e| e.id != 1));
        }
    }

    #[test]
    fn test_speed_ceiling_holds() {
        let tuning = Tuning {
            max_track_speed: Some(1.001),
            ..Default::default()
        };
        let mut speed = tuning.initial_track_speed;
        for _ in 0..10 {
            let next = accelerate(speed, &tuning);
            assert!(next >= speed);
            speed = next;
        }
        assert_eq!(speed, 1.001);
    }
}
