//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here so it can be tweaked from
//! the settings file instead of recompiling. Positions and band geometry are
//! expressed in percent of track height (0 = top edge).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::catalog;

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Number of lanes (player starts in the middle one)
    pub lane_count: usize,

    // === Player footprint ===
    /// Top edge of the player's band
    pub player_band_start: f64,
    /// Height of the player's band; entities share the same height
    pub band_height: f64,
    /// Total inward shrink applied to overlap tests (half per band edge)
    pub hitbox_margin: f64,

    // === Progression ===
    /// Track speed at the start of a run
    pub initial_track_speed: f64,
    /// Track speed added every tick
    pub accel_rate: f64,
    /// Optional ceiling on track speed (`None` = ramp forever)
    pub max_track_speed: Option<f64>,
    /// Score gained per tick per unit of track speed
    pub score_rate: f64,

    // === Spawning ===
    /// Spawn interval at zero speed (ms)
    pub spawn_interval_base_ms: f64,
    /// Shortest spawn interval (ms)
    pub spawn_interval_floor_ms: f64,
    /// Interval reduction per unit of track speed (ms)
    pub spawn_decay_factor: f64,
    /// Chance that a spawn is a rival instead of an obstacle
    pub rival_probability: f64,
    /// Rival relative speed is drawn from `[min, max)`
    pub rival_speed_min: f64,
    pub rival_speed_max: f64,
    /// Where new obstacles appear (slightly above the visible track)
    pub obstacle_spawn_position: f64,
    /// Where new rivals appear
    pub rival_spawn_position: f64,
    /// Safety ceiling on simultaneous live entities
    pub max_live_entities: usize,

    // === Motion ===
    /// Fraction of a rival's relative speed subtracted from its scroll speed
    pub rival_damping: f64,
    /// Entities at or past this position are removed
    pub exit_threshold: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_count: 3,

            player_band_start: 80.0,
            band_height: 10.0,
            hitbox_margin: 3.0,

            initial_track_speed: 1.0,
            accel_rate: 0.0006,
            max_track_speed: None,
            score_rate: 0.6,

            spawn_interval_base_ms: 1200.0,
            spawn_interval_floor_ms: 350.0,
            spawn_decay_factor: 180.0,
            rival_probability: 0.3,
            rival_speed_min: 0.5,
            rival_speed_max: 0.9,
            obstacle_spawn_position: -10.0,
            rival_spawn_position: -15.0,
            max_live_entities: 256,

            rival_damping: 0.5,
            exit_threshold: 120.0,
        }
    }
}

impl Tuning {
    /// Lane the player starts a run in
    pub fn center_lane(&self) -> usize {
        self.lane_count / 2
    }

    /// Reject tunings that would break run invariants. Also checks the
    /// static catalogs, since a run cannot spawn without them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        catalog::validate()?;

        positive("band_height", self.band_height)?;
        positive("initial_track_speed", self.initial_track_speed)?;
        positive("accel_rate", self.accel_rate)?;
        positive("spawn_interval_base_ms", self.spawn_interval_base_ms)?;
        positive("rival_speed_min", self.rival_speed_min)?;
        non_negative("hitbox_margin", self.hitbox_margin)?;
        non_negative("score_rate", self.score_rate)?;
        non_negative("spawn_interval_floor_ms", self.spawn_interval_floor_ms)?;
        non_negative("spawn_decay_factor", self.spawn_decay_factor)?;
        non_negative("rival_damping", self.rival_damping)?;

        finite("player_band_start", self.player_band_start)?;
        finite("obstacle_spawn_position", self.obstacle_spawn_position)?;
        finite("rival_spawn_position", self.rival_spawn_position)?;
        finite("exit_threshold", self.exit_threshold)?;
        finite("rival_speed_max", self.rival_speed_max)?;

        if !(0.0..=1.0).contains(&self.rival_probability) {
            return Err(ConfigError::RivalProbability(self.rival_probability));
        }
        if self.hitbox_margin >= self.band_height {
            return Err(ConfigError::MarginSwallowsBand {
                margin: self.hitbox_margin,
                band_height: self.band_height,
            });
        }
        if self.spawn_interval_floor_ms > self.spawn_interval_base_ms {
            return Err(ConfigError::SpawnFloorAboveBase {
                floor: self.spawn_interval_floor_ms,
                base: self.spawn_interval_base_ms,
            });
        }
        if self.rival_speed_max <= self.rival_speed_min {
            return Err(ConfigError::RivalSpeedRange {
                min: self.rival_speed_min,
                max: self.rival_speed_max,
            });
        }
        // Track speed only grows, so the first tick is the slowest a rival ever scrolls
        if self.rival_speed_max * self.rival_damping >= self.initial_track_speed {
            return Err(ConfigError::RivalsDriftBackward {
                rival_speed_max: self.rival_speed_max,
                rival_damping: self.rival_damping,
                initial_track_speed: self.initial_track_speed,
            });
        }
        let furthest_spawn = self.obstacle_spawn_position.max(self.rival_spawn_position);
        if self.exit_threshold <= furthest_spawn {
            return Err(ConfigError::ExitBeforeSpawn {
                exit: self.exit_threshold,
                spawn: furthest_spawn,
            });
        }
        if let Some(max) = self.max_track_speed {
            finite("max_track_speed", max)?;
            if max < self.initial_track_speed {
                return Err(ConfigError::MaxSpeedBelowInitial {
                    max,
                    initial: self.initial_track_speed,
                });
            }
        }
        if self.max_live_entities == 0 {
            return Err(ConfigError::NoEntityCapacity);
        }
        Ok(())
    }

    /// Current spawn interval for a given track speed (ms)
    pub fn spawn_interval_ms(&self, track_speed: f64) -> f64 {
        (self.spawn_interval_base_ms - track_speed * self.spawn_decay_factor)
            .max(self.spawn_interval_floor_ms)
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
        assert_eq!(Tuning::default().center_lane(), 1);
    }

    #[test]
    fn test_zero_lanes_rejected() {
        let tuning = Tuning {
            lane_count: 0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(ConfigError::NoLanes));
    }

    #[test]
    fn test_rival_speed_must_be_positive() {
        let tuning = Tuning {
            rival_speed_min: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotPositive { name: "rival_speed_min", .. })
        ));
    }

    #[test]
    fn test_bad_probability_and_floor_rejected() {
        let tuning = Tuning {
            rival_probability: 1.5,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(ConfigError::RivalProbability(1.5)));

        let tuning = Tuning {
            spawn_interval_floor_ms: 2000.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::SpawnFloorAboveBase { .. })
        ));
    }

    #[test]
    fn test_max_speed_below_initial_rejected() {
        let tuning = Tuning {
            max_track_speed: Some(0.5),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::MaxSpeedBelowInitial { .. })
        ));
    }

    #[test]
    fn test_rivals_that_would_scroll_backward_rejected() {
        let tuning = Tuning {
            rival_damping: 3.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::RivalsDriftBackward { .. })
        ));

        // 0.9 * 0.5 sits just under an initial speed of 0.46
        let tuning = Tuning {
            initial_track_speed: 0.46,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Ok(()));
        let tuning = Tuning {
            initial_track_speed: 0.45,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::RivalsDriftBackward { .. })
        ));
    }

    #[test]
    fn test_margin_wider_than_band_rejected() {
        let tuning = Tuning {
            hitbox_margin: 20.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::MarginSwallowsBand {
                margin: 20.0,
                band_height: 10.0,
            })
        );
        let tuning = Tuning {
            hitbox_margin: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::MarginSwallowsBand { .. })
        ));
    }

    #[test]
    fn test_non_finite_positions_rejected() {
        let tuning = Tuning {
            exit_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotFinite { name: "exit_threshold", .. })
        ));

        let tuning = Tuning {
            player_band_start: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotFinite { name: "player_band_start", .. })
        ));

        let tuning = Tuning {
            rival_speed_max: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotFinite { name: "rival_speed_max", .. })
        ));

        let tuning = Tuning {
            max_track_speed: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotFinite { name: "max_track_speed", .. })
        ));
    }

    #[test]
    fn test_empty_rival_speed_range_rejected() {
        let tuning = Tuning {
            rival_speed_max: 0.5,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::RivalSpeedRange { min: 0.5, max: 0.5 })
        );
    }

    #[test]
    fn test_spawn_interval_shrinks_to_floor() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_interval_ms(1.0) - 1020.0).abs() < 1e-9);
        assert!((tuning.spawn_interval_ms(2.0) - 840.0).abs() < 1e-9);
        // 1200 - 10 * 180 is negative, floor wins
        assert_eq!(tuning.spawn_interval_ms(10.0), 350.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "lane_count": 5 }"#).unwrap();
        assert_eq!(tuning.lane_count, 5);
        assert_eq!(tuning.center_lane(), 2);
        assert_eq!(tuning.exit_threshold, 120.0);
    }
}
