//! The simulation's single shared pseudo-random source.
//!
//! Destination choice and spawn jitter draw from one `SimRng`.  Runs are not
//! required to be reproducible, but a seeded `SimRng` makes itinerary and
//! spawn choices repeatable for tests and replays.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only from the single-threaded tick loop.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Deterministic stream from `seed`.
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Non-reproducible stream seeded from OS entropy.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Seeded when `seed` is `Some`, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None    => Self::from_entropy(),
        }
    }

    /// Uniform sample in `[0, max)`.  Returns 0 when `max <= 0`.
    #[inline]
    pub fn jitter(&mut self, max: f64) -> f64 {
        if max > 0.0 {
            self.0.gen_range(0.0..max)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
