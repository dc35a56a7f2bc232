//! Seeded random source shared by everything that draws randomness in a session

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic uniform integer/float generator.
///
/// Seeded once when the arena is created; every spawn placement and
/// fire-timer draw advances the same sequence.
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: Pcg32,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[0, max_exclusive)`; 0 for an empty range
    pub fn next_int(&mut self, max_exclusive: u32) -> u32 {
        if max_exclusive == 0 {
            return 0;
        }
        self.rng.random_range(0..max_exclusive)
    }

    /// Uniform float in `[0, max)`
    pub fn next_float(&mut self, max: f32) -> f32 {
        self.rng.random::<f32>() * max
    }
}
