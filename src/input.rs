//! Lane-change input boundary
//!
//! Input arrives on its own channel (key handler, touch zone, another
//! thread). The lane is a single atomic scalar: a command is one
//! read-modify-write, the tick loads it once, and nothing can observe a
//! half-applied change.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug)]
struct LaneCell {
    lane: AtomicUsize,
    /// Commands only land while a run is active
    live: AtomicBool,
    lane_count: usize,
}

/// Cloneable handle for steering the player between lanes
#[derive(Debug, Clone)]
pub struct LaneControl {
    cell: Arc<LaneCell>,
}

impl LaneControl {
    pub fn new(lane_count: usize) -> Self {
        let lane_count = lane_count.max(1);
        Self {
            cell: Arc::new(LaneCell {
                lane: AtomicUsize::new(lane_count / 2),
                live: AtomicBool::new(false),
                lane_count,
            }),
        }
    }

    /// Shift one lane left (`-1`) or right (`+1`), clamped to the track.
    /// Any other direction, or a command while no run is active, is ignored.
    /// Returns the lane after the command.
    pub fn request_lane_change(&self, direction: i32) -> usize {
        if !matches!(direction, -1 | 1) || !self.cell.live.load(Ordering::Acquire) {
            return self.lane();
        }
        let max_lane = self.cell.lane_count - 1;
        let update = self
            .cell
            .lane
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |lane| {
                Some(if direction < 0 {
                    lane.saturating_sub(1)
                } else {
                    (lane + 1).min(max_lane)
                })
            });
        // The closure never returns None, so both arms carry the old lane
        let previous = match update {
            Ok(lane) | Err(lane) => lane,
        };
        if direction < 0 {
            previous.saturating_sub(1)
        } else {
            (previous + 1).min(max_lane)
        }
    }

    /// Current lane
    pub fn lane(&self) -> usize {
        self.cell.lane.load(Ordering::Acquire)
    }

    pub fn lane_count(&self) -> usize {
        self.cell.lane_count
    }

    /// Whether lane commands currently take effect
    pub fn is_live(&self) -> bool {
        self.cell.live.load(Ordering::Acquire)
    }

    /// Center the player and start accepting commands (run start)
    pub(crate) fn arm(&self) {
        self.cell
            .lane
            .store(self.cell.lane_count / 2, Ordering::Release);
        self.cell.live.store(true, Ordering::Release);
    }

    /// Stop accepting commands (run over / abandoned)
    pub(crate) fn disarm(&self) {
        self.cell.live.store(false, Ordering::Release);
    }
}
