//! Seeded random streams.
//!
//! A replicate run derives its root stream from the experiment seed and the
//! run index:
//!
//!   seed = global_seed XOR (run_index * MIXING_CONSTANT)
//!
//! The root is then split into one child per consumer (arrivals, service
//! times, routing).  Two policies run with the same seed therefore see the
//! same arrival and service sequences however many draws their routing
//! makes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional part of the golden ratio.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// A random stream with a single owner.
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Root stream of replicate `run_index`.
    pub fn for_run(global_seed: u64, run_index: u64) -> Self {
        Self::new(global_seed ^ run_index.wrapping_mul(MIXING_CONSTANT))
    }

    /// Split off an independent stream.  `offset` tells siblings apart.
    pub fn child(&mut self, offset: u64) -> SimRng {
        Self::new(self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT))
    }

    /// The underlying generator, for sampling `rand_distr` distributions.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
