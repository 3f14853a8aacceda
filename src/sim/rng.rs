//! Injectable randomness
//!
//! Spawning only ever asks for "a uniform number in this range". Live runs use
//! a seeded PCG stream; tests feed a scripted sequence and assert exact spawns.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform random numbers
pub trait RandomSource {
    /// Uniform value in `[low, high)`
    fn next_in_range(&mut self, low: f64, high: f64) -> f64;

    /// Uniform index into a collection of `len` items (`len` must be > 0)
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let idx = self.next_in_range(0.0, len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl RandomSource for Pcg32 {
    fn next_in_range(&mut self, low: f64, high: f64) -> f64 {
        if high > low {
            self.random_range(low..high)
        } else {
            low
        }
    }
}

/// Seeded PCG stream for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of unit values (`[0, 1)`), scaled into each range.
/// Cycles when exhausted so long scripted runs never starve.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().map(|v| v.clamp(0.0, 0.999_999)).collect(),
            cursor: 0,
        }
    }

    /// Append more unit values to the script
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value.clamp(0.0, 0.999_999));
    }

    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

impl RandomSource for ScriptedRandom {
    fn next_in_range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }
}
