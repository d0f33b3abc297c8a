//! # superseq-core
//!
//! Distinct-sequence generation over a bounded integer range, without a
//! visited-set, plus the statistical tests used to certify the output.
//!
//! For a range `[0, N]` and a requested count `K + 1`, a monotonic counter
//! is pushed through a stack of invertible bit transforms (bit
//! concatenation, symmetry fold, modular half-mix, flat and recursive
//! Feistel rounds). Every stage is a bijection at fixed width, so distinct
//! counter values yield distinct outputs while memory stays O(1) — ranges
//! up to 2^64 work the same as tiny ones. The mixing level (strategies
//! `Super0` through `Super4`) trades throughput against statistical
//! quality; the [`stats`] module measures that quality empirically.
//!
//! This is a fast mixing primitive, not a security primitive: no
//! cryptographic claim is made anywhere.

#![deny(unsafe_code)]

pub mod mixer;
pub mod params;
pub mod sampler;
pub mod source;
pub mod stats;

pub use params::RangeSpec;
pub use sampler::{Sampler, StrategyKind};
