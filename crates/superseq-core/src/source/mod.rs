//! Seeded raw uniform source.
//!
//! Every engine owns exactly one source. An explicit seed gives a fully
//! reproducible draw stream; the entropy constructor seeds from the OS.

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seeded 64-bit uniform integer source.
///
/// Same seed, same stream — element for element. Draws have no side effect
/// beyond advancing the engine state.
#[derive(Clone, Debug)]
pub struct UniformSource {
    rng: StdRng,
}

impl UniformSource {
    /// Deterministic source from an explicit seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// One draw from the full unsigned 64-bit range.
    #[inline]
    pub fn raw64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = UniformSource::with_seed(7);
        let mut b = UniformSource::with_seed(7);
        for _ in 0..64 {
            assert_eq!(a.raw64(), b.raw64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = UniformSource::with_seed(1);
        let mut b = UniformSource::with_seed(2);
        let diverged = (0..16).any(|_| a.raw64() != b.raw64());
        assert!(diverged, "seeds 1 and 2 produced identical 16-draw prefixes");
    }
}
