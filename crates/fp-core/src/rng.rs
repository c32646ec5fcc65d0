//! Deterministic RNG wrapper for layout generation.
//!
//! The planner itself is deterministic and never draws random numbers; only
//! synthetic field layouts do.  `LayoutRng` wraps a seeded `SmallRng` so a
//! given seed always produces the same layout.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for reproducible layouts.
pub struct LayoutRng(SmallRng);

impl LayoutRng {
    pub fn new(seed: u64) -> Self {
        LayoutRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
