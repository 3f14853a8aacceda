//! Application settings
//!
//! Loaded from a JSON file next to the binary. Every field has a default, so
//! a partial file (or none at all) is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::flavor::DEFAULT_TIMEOUT;
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; random per launch when unset
    pub seed: Option<u64>,

    // === Flavor text ===
    /// Request taunts and commentary at all
    pub flavor_text: bool,
    /// How long a flavor request may take before its fallback shows
    pub flavor_timeout_ms: u64,

    // === Persistence ===
    /// Where the best score is kept (in-memory only when unset)
    pub best_score_path: Option<PathBuf>,

    /// Game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            flavor_text: true,
            flavor_timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            best_score_path: Some(PathBuf::from("lane_runner_best.json")),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn flavor_timeout(&self) -> Duration {
        Duration::from_millis(self.flavor_timeout_ms)
    }

    /// Load settings from a JSON file, falling back to defaults when the file
    /// is missing or unreadable. Tuning is validated later, at game creation.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("nope.json"));
        assert!(settings.flavor_text);
        assert_eq!(settings.tuning, Tuning::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "seed": 7, "flavor_text": false, "tuning": { "accel_rate": 0.001 } }"#,
        )
        .unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.flavor_text);
        assert_eq!(settings.tuning.accel_rate, 0.001);
        assert_eq!(settings.tuning.lane_count, 3);
        assert_eq!(settings.flavor_timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            seed: Some(99),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).seed, Some(99));
    }
}
