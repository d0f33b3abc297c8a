//! Statistical certification of generated sequences.
//!
//! Pure functions over an already-materialized sequence: a
//! permutation-uniformity test over sliding 5-tuples, a binned uniformity
//! test over the whole value range, and the incomplete-gamma/chi-squared
//! machinery backing both. No state is kept anywhere, so independent
//! sequences can be scored from as many threads as the caller likes.

pub mod gamma;
pub mod operm5;
pub mod special;
pub mod uniform;

pub use gamma::{chi_squared_cdf, chi_squared_p, incomplete_gamma_p};
pub use operm5::permutation_uniformity_p;
pub use uniform::binned_uniformity_p;

use thiserror::Error;

/// Validation-engine failures: numerical domain violations and
/// precondition violations. All are local and synchronous; no partial
/// result is ever substituted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("incomplete gamma is defined for a > 0, x >= 0 (got a = {a}, x = {x})")]
    GammaDomain { a: f64, x: f64 },
    #[error("chi-squared requires positive degrees of freedom")]
    ZeroDegreesOfFreedom,
    #[error("chi-squared statistic must be non-negative (got {0})")]
    NegativeChiSquared(f64),
    #[error("permutation test requires at least {min} samples (got {len})")]
    ShortSequence { len: usize, min: usize },
    #[error("uniformity test requires a non-empty sequence")]
    EmptySequence,
    #[error("uniformity test requires max > min (got min = {min}, max = {max})")]
    EmptyRange { min: u64, max: u64 },
}
