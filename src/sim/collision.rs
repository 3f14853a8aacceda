//! Collision detection
//!
//! Lanes are discrete, so a hit is just "same lane and the vertical bands
//! overlap". Both bands are shrunk a little first so grazing contact doesn't
//! count.

use super::entity::Entity;

/// Half-open vertical span `[start, start + height)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f64,
    pub height: f64,
}

impl Band {
    pub fn new(start: f64, height: f64) -> Self {
        Self { start, height }
    }

    pub fn end(&self) -> f64 {
        self.start + self.height
    }

    /// Shrink by `inset` on both edges (may become empty)
    pub fn shrink(&self, inset: f64) -> Band {
        Band {
            start: self.start + inset,
            height: (self.height - 2.0 * inset).max(0.0),
        }
    }

    /// Whether two half-open spans share any point
    pub fn overlaps(&self, other: &Band) -> bool {
        self.height > 0.0
            && other.height > 0.0
            && self.start < other.end()
            && other.start < self.end()
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult<'a> {
    /// Entity the player ran into
    pub entity: &'a Entity,
    /// Overlap depth after leniency was applied
    pub penetration: f64,
}

/// First entity (in live-set order) sharing the player's lane whose band
/// overlaps the player's band. `margin` is the total leniency, split evenly
/// between the two bands. Entities share the player's band height.
pub fn find_collision<'a>(
    player_lane: usize,
    player_band: Band,
    entities: &'a [Entity],
    margin: f64,
) -> Option<CollisionResult<'a>> {
    let inset = margin / 2.0;
    let player = player_band.shrink(inset);

    entities
        .iter()
        .filter(|e| e.lane == player_lane)
        .find_map(|entity| {
            let band = Band::new(entity.position, player_band.height).shrink(inset);
            band.overlaps(&player).then(|| CollisionResult {
                entity,
                penetration: band.end().min(player.end()) - band.start.max(player.start),
            })
        })
}
