//! Static spawn catalogs
//!
//! Everything that can appear on the track. Spawns pick a uniformly random
//! entry, so the lists must never be empty.

use serde::Serialize;

use crate::error::ConfigError;

/// A static hazard that scrolls with the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObstacleProfile {
    pub name: &'static str,
    pub icon: &'static str,
}

/// A racer from another era, drifting down slower than the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RivalProfile {
    pub name: &'static str,
    pub era: &'static str,
    /// Livery tag handed to the renderer
    pub color: &'static str,
    /// Stock trash talk, used when no flavor-text service is wired up
    pub taunt: &'static str,
}

pub const RIVALS: &[RivalProfile] = &[
    RivalProfile {
        name: "Al 'The Tommy' Capwn",
        era: "1920s",
        color: "amber-800",
        taunt: "See ya, wise guy!",
    },
    RivalProfile {
        name: "Sir Lags-A-Lot",
        era: "1300s",
        color: "slate-500",
        taunt: "Thou art too slow, knave!",
    },
    RivalProfile {
        name: "Crypto Chad",
        era: "2024",
        color: "blue-400",
        taunt: "Have fun staying poor (and slow)!",
    },
    RivalProfile {
        name: "Grok the Caveman",
        era: "10000 BC",
        color: "stone-600",
        taunt: "Me fast. You food.",
    },
    RivalProfile {
        name: "Steam Baroness",
        era: "1890s",
        color: "yellow-700",
        taunt: "My gears turn faster than your wit!",
    },
];

pub const OBSTACLES: &[ObstacleProfile] = &[
    ObstacleProfile {
        name: "Dial-up Modem",
        icon: "📠",
    },
    ObstacleProfile {
        name: "Rubik's Cube",
        icon: "🧊",
    },
    ObstacleProfile {
        name: "Laser Grid",
        icon: "⚡",
    },
    ObstacleProfile {
        name: "VHS Tape",
        icon: "📼",
    },
    ObstacleProfile {
        name: "Banana Peel",
        icon: "🍌",
    },
    ObstacleProfile {
        name: "Time Vortex",
        icon: "🌀",
    },
    ObstacleProfile {
        name: "Giant 8-Ball",
        icon: "🎱",
    },
    ObstacleProfile {
        name: "Pizza Rat",
        icon: "🐀",
    },
    ObstacleProfile {
        name: "Wet Floor Sign",
        icon: "⚠️",
    },
    ObstacleProfile {
        name: "Keytar",
        icon: "🎹",
    },
    ObstacleProfile {
        name: "Floppy Disk",
        icon: "💾",
    },
    ObstacleProfile {
        name: "Arcade Cabinet",
        icon: "🕹️",
    },
    ObstacleProfile {
        name: "Neon Palm",
        icon: "🌴",
    },
    ObstacleProfile {
        name: "Boombox",
        icon: "📻",
    },
    ObstacleProfile {
        name: "Roller Skate",
        icon: "🛼",
    },
];

/// Both catalogs must have at least one entry
pub fn validate() -> Result<(), ConfigError> {
    if OBSTACLES.is_empty() {
        return Err(ConfigError::EmptyCatalog("obstacle"));
    }
    if RIVALS.is_empty() {
        return Err(ConfigError::EmptyCatalog("rival"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_are_usable() {
        assert_eq!(validate(), Ok(()));
        assert!(OBSTACLES.iter().all(|o| !o.name.is_empty()));
        assert!(RIVALS.iter().all(|r| !r.name.is_empty() && !r.taunt.is_empty()));
    }
}
