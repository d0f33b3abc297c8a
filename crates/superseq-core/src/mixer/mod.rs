//! The bit-mixing engine: a monotonic counter pushed through a stack of
//! invertible transforms.
//!
//! Per call, fresh noise is drawn for the high bits while the low
//! `control_mask` bits are forced equal to the counter. The counter bits
//! are the only source of the distinctness guarantee; every later stage is
//! a bijection over the `bit_width_b4`-bit space, so distinct counters
//! yield distinct outputs. The mixing level trades speed against
//! statistical quality and is the engine's only knob.

mod keys;
mod transforms;

use thiserror::Error;

use crate::params::{RangeParams, RangeSpec, ceil_log2_u128};
use crate::source::UniformSource;
use keys::{KeyTree, cascade};
use transforms::{flat_feistel, hadamard, half_mask, symmetry};

/// Rounds of the flat (non-recursive) Feistel stage.
const FLAT_ROUNDS: usize = 1;

/// Unrecognized numeric mixing level; construction fails instead of
/// falling back to a default engine.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mixing level {0} (expected 0..=4)")]
pub struct UnknownLevelError(pub u32);

/// Mixing depth. A closed set: there is no way to add levels without
/// touching every dispatch site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixLevel {
    /// Bit concatenation only: distinctness without diffusion.
    Level0,
    /// symmetry -> half-mix -> flat Feistel -> symmetry.
    Level1,
    /// symmetry -> half-mix -> recursive cascade -> symmetry.
    Level2,
    /// The level-2 stack repeated 4 times.
    Level3,
    /// The level-2 stack repeated 128 times.
    Level4,
}

impl MixLevel {
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Level0 => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
            Self::Level4 => 4,
        }
    }

    /// Repetitions of the half-mix/cascade/symmetry stack for the cascade
    /// levels.
    const fn cascade_repeats(self) -> u32 {
        match self {
            Self::Level0 | Self::Level1 => 0,
            Self::Level2 => 1,
            Self::Level3 => 4,
            Self::Level4 => 128,
        }
    }
}

impl TryFrom<u32> for MixLevel {
    type Error = UnknownLevelError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Level0),
            1 => Ok(Self::Level1),
            2 => Ok(Self::Level2),
            3 => Ok(Self::Level3),
            4 => Ok(Self::Level4),
            other => Err(UnknownLevelError(other)),
        }
    }
}

/// Derived constants and keys, computed once at construction and immutable
/// afterwards. All fixed keys are drawn up front; per-call draws only feed
/// the noise portion and never touch the counter-carrying bits.
#[derive(Debug, Clone)]
struct MixerState {
    /// Half of `bit_width` rounded up to even; the split point for every
    /// two-half transform.
    half_width: u32,
    /// Exclusive bound for per-call noise draws; `u64::MAX` means the draw
    /// is unrestricted (64-bit-wide range).
    noise_ceiling: u64,
    /// Low-bit mask forcing output bits equal to the counter. Sized to
    /// cover `sample_count` plus every impossible value above `modulus`.
    control_mask: u64,
    /// Keys for the flat Feistel stage, one per round.
    flat_keys: Vec<u64>,
    /// Per-node keys for the recursive cascade.
    key_tree: KeyTree,
}

/// One mixing engine instance: derived state, a counter advanced by exactly
/// one per output, and the owning entropy source.
///
/// Not synchronized; concurrent calls on one instance are a data race by
/// contract. Distinct instances share nothing.
#[derive(Debug, Clone)]
pub struct SuperMixer {
    params: RangeParams,
    state: MixerState,
    source: UniformSource,
    counter: u64,
    level: MixLevel,
}

impl SuperMixer {
    /// Build the engine: derive range constants, size the control mask, and
    /// draw every fixed key from the seeded source.
    #[must_use]
    pub fn new(spec: RangeSpec, level: MixLevel, mut source: UniformSource) -> Self {
        let params = RangeParams::derive(spec);

        let bit_width_b4 = params.bit_width + (params.bit_width & 1);
        let half_width = bit_width_b4 / 2;

        let noise_ceiling = if params.bit_width < 64 {
            1u64 << params.bit_width
        } else {
            u64::MAX
        };

        // The mask must cover the requested samples plus every value the
        // widened pipeline can emit above the modulus, so rejected draws
        // cannot exhaust the counter window.
        let ignored = if bit_width_b4 < 64 {
            (1u64 << bit_width_b4) - params.modulus
        } else {
            u64::MAX - params.modulus
        };
        let mask_bits =
            ceil_log2_u128(u128::from(ignored) + u128::from(params.sample_count) + 1);
        let control_mask = if params.sample_count < u64::MAX && mask_bits < 64 {
            (1u64 << mask_bits) - 1
        } else {
            u64::MAX
        };

        let key_tree = KeyTree::build(&mut source, half_width);
        let flat_keys = (0..FLAT_ROUNDS)
            .map(|_| source.raw64() & half_mask(half_width))
            .collect();

        Self {
            params,
            state: MixerState {
                half_width,
                noise_ceiling,
                control_mask,
                flat_keys,
                key_tree,
            },
            source,
            counter: 0,
            level,
        }
    }

    /// Advance the counter and emit one mixed value.
    ///
    /// Output is bounded by `2^bit_width_b4`, not by the modulus; the
    /// facade rejects the overshoot.
    pub fn generate(&mut self) -> u64 {
        let mut out = self.bit_concat();
        match self.level {
            MixLevel::Level0 => {}
            MixLevel::Level1 => {
                out = self.symmetry(out);
                out = self.hadamard(out);
                out = self.flat_feistel(out);
                out = self.symmetry(out);
            }
            MixLevel::Level2 | MixLevel::Level3 | MixLevel::Level4 => {
                out = self.symmetry(out);
                for _ in 0..self.level.cascade_repeats() {
                    out = self.hadamard(out);
                    out = self.cascade(out);
                    out = self.symmetry(out);
                }
            }
        }
        self.counter += 1;
        out
    }

    /// `"Super<level>"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("Super{}", self.level.index())
    }

    /// Current counter position (number of calls made so far).
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.counter
    }

    #[must_use]
    pub const fn params(&self) -> &RangeParams {
        &self.params
    }

    /// Fresh noise above the control mask, the counter below it.
    fn bit_concat(&mut self) -> u64 {
        let noise = if self.state.noise_ceiling < u64::MAX {
            self.source.raw64() % self.state.noise_ceiling
        } else {
            self.source.raw64()
        };
        (noise & !self.state.control_mask) | (self.counter & self.state.control_mask)
    }

    fn symmetry(&self, x: u64) -> u64 {
        symmetry(x, self.params.bit_width, self.state.half_width)
    }

    fn hadamard(&self, x: u64) -> u64 {
        hadamard(x, self.state.half_width)
    }

    fn flat_feistel(&self, x: u64) -> u64 {
        flat_feistel(x, self.state.half_width, &self.state.flat_keys)
    }

    fn cascade(&self, x: u64) -> u64 {
        cascade(x, 1, self.state.half_width, &self.state.key_tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mixer(n: u64, k: u64, level: u32, seed: u64) -> SuperMixer {
        let level = MixLevel::try_from(level).expect("test level");
        SuperMixer::new(RangeSpec::new(n, k), level, UniformSource::with_seed(seed))
    }

    #[test]
    fn rejects_unknown_level() {
        assert_eq!(MixLevel::try_from(5), Err(UnknownLevelError(5)));
        assert_eq!(MixLevel::try_from(99), Err(UnknownLevelError(99)));
    }

    #[test]
    fn reports_level_name() {
        assert_eq!(mixer(100, 10, 0, 1).name(), "Super0");
        assert_eq!(mixer(100, 10, 3, 1).name(), "Super3");
    }

    #[test]
    fn counter_advances_once_per_call() {
        let mut m = mixer(1000, 100, 2, 7);
        assert_eq!(m.position(), 0);
        m.generate();
        m.generate();
        assert_eq!(m.position(), 2);
    }

    #[test]
    fn level0_emits_raw_counter_for_tight_masks() {
        // With N = 5 the noise ceiling (8) sits entirely below the control
        // mask (15), so the identity level emits the bare counter.
        let mut m = mixer(5, 4, 0, 3);
        let first: Vec<u64> = (0..5).map(|_| m.generate()).collect();
        assert_eq!(first, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn raw_outputs_are_distinct_within_the_counter_window() {
        // Distinctness of the raw (pre-rejection) stream across levels.
        for level in 1..=4u32 {
            let mut m = mixer(255, 255, level, 11);
            let outs: HashSet<u64> = (0..256).map(|_| m.generate()).collect();
            assert_eq!(outs.len(), 256, "level {level}");
        }
    }

    #[test]
    fn same_seed_reproduces_raw_stream() {
        let mut a = mixer(1_000_000, 500, 2, 99);
        let mut b = mixer(1_000_000, 500, 2, 99);
        for _ in 0..501 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn wide_range_outputs_fit_the_rounded_width() {
        let mut m = mixer((1 << 20) - 1, 1000, 2, 13);
        // bit_width 20 is already even; outputs stay below 2^20.
        for _ in 0..1001 {
            assert!(m.generate() < (1 << 20));
        }
    }

    #[test]
    fn full_width_boundary_constructs() {
        let mut m = mixer(u64::MAX, 1000, 1, 0);
        for _ in 0..10 {
            m.generate();
        }
        assert_eq!(m.position(), 10);
    }
}
