//! Deterministic-seed mode for development and testing
//!
//! In production every request draws from a freshly entropy-seeded
//! generator, so two identical requests may be answered differently. With a
//! seed configured, every request starts from the same generator state and
//! identical requests get identical responses.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Random-source policy for the request pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DevMode {
    /// Seed applied to every request; `None` means entropy-seeded
    pub seed: Option<u64>,
}

impl DevMode {
    /// Create a dev mode configuration
    ///
    /// # Arguments
    /// * `seed` - Replay every request from this seed, or `None` for live randomness
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Random source for one request
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Random source for the `index`-th of several independent runs
    /// (verification trials). Seeded runs stay reproducible but differ
    /// from each other.
    pub fn rng_for(&self, index: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index)),
            None => StdRng::from_entropy(),
        }
    }
}
