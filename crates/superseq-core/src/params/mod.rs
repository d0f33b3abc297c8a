//! Range parameters derived from the caller's (N, K) request.
//!
//! The generator produces `K + 1` values drawn from `[0, N]`. Both bounds
//! are recognized special cases at `u64::MAX`, where the usual `+ 1` would
//! wrap; the dedicated branches below keep the arithmetic in range.

/// Caller-supplied range request: values in `[0, n]`, samples `0..=k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeSpec {
    /// Inclusive upper bound of the output range.
    pub n: u64,
    /// Index of the last sample, so `k + 1` values are produced.
    pub k: u64,
}

impl RangeSpec {
    #[must_use]
    pub const fn new(n: u64, k: u64) -> Self {
        Self { n, k }
    }
}

/// Constants derived once from a [`RangeSpec`] and shared by every strategy.
///
/// `sample_count <= modulus` is assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeParams {
    /// Size of the output range: `n + 1`, or `n` itself at the 64-bit
    /// boundary.
    pub modulus: u64,
    /// Number of samples requested: `k + 1`, with the symmetric boundary
    /// case.
    pub sample_count: u64,
    /// `max(1, ceil(log2(modulus)))`.
    pub bit_width: u32,
}

impl RangeParams {
    #[must_use]
    pub fn derive(spec: RangeSpec) -> Self {
        let modulus = if spec.n == u64::MAX { spec.n } else { spec.n + 1 };
        let sample_count = if spec.k == u64::MAX { spec.k } else { spec.k + 1 };
        let bit_width = ceil_log2_u64(modulus).max(1);
        Self {
            modulus,
            sample_count,
            bit_width,
        }
    }

    /// Largest value the range can contain.
    #[must_use]
    pub fn max_value(&self) -> u64 {
        if self.modulus < u64::MAX {
            self.modulus - 1
        } else {
            u64::MAX
        }
    }

    /// Smallest value the range can contain.
    #[must_use]
    pub const fn min_value(&self) -> u64 {
        0
    }
}

/// Smallest `b` with `2^b >= v`, in pure integer arithmetic. The float
/// `ceil(log2(v))` loses exactness above 2^53.
pub(crate) fn ceil_log2_u64(v: u64) -> u32 {
    if v <= 1 { 0 } else { 64 - (v - 1).leading_zeros() }
}

/// Widened variant for sums that may not fit in 64 bits.
pub(crate) fn ceil_log2_u128(v: u128) -> u32 {
    if v <= 1 {
        0
    } else {
        128 - (v - 1).leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_log2_matches_powers() {
        assert_eq!(ceil_log2_u64(1), 0);
        assert_eq!(ceil_log2_u64(2), 1);
        assert_eq!(ceil_log2_u64(3), 2);
        assert_eq!(ceil_log2_u64(4), 2);
        assert_eq!(ceil_log2_u64(5), 3);
        assert_eq!(ceil_log2_u64(1 << 20), 20);
        assert_eq!(ceil_log2_u64((1 << 20) + 1), 21);
        assert_eq!(ceil_log2_u64(u64::MAX), 64);
    }

    #[test]
    fn small_ranges() {
        let p = RangeParams::derive(RangeSpec::new(0, 0));
        assert_eq!(p.modulus, 1);
        assert_eq!(p.sample_count, 1);
        assert_eq!(p.bit_width, 1);
        assert_eq!(p.max_value(), 0);

        let p = RangeParams::derive(RangeSpec::new(1, 1));
        assert_eq!(p.modulus, 2);
        assert_eq!(p.bit_width, 1);

        let p = RangeParams::derive(RangeSpec::new(5, 4));
        assert_eq!(p.modulus, 6);
        assert_eq!(p.sample_count, 5);
        assert_eq!(p.bit_width, 3);
        assert_eq!(p.max_value(), 5);

        let p = RangeParams::derive(RangeSpec::new(100, 50));
        assert_eq!(p.modulus, 101);
        assert_eq!(p.sample_count, 51);
        assert_eq!(p.bit_width, 7);
    }

    #[test]
    fn overflow_boundaries() {
        let p = RangeParams::derive(RangeSpec::new(u64::MAX, u64::MAX));
        assert_eq!(p.modulus, u64::MAX);
        assert_eq!(p.sample_count, u64::MAX);
        assert_eq!(p.bit_width, 64);
        assert_eq!(p.max_value(), u64::MAX);

        let p = RangeParams::derive(RangeSpec::new(u64::MAX, 100_000));
        assert_eq!(p.modulus, u64::MAX);
        assert_eq!(p.sample_count, 100_001);
    }

    #[test]
    fn min_value_is_zero() {
        let p = RangeParams::derive(RangeSpec::new(255, 16));
        assert_eq!(p.min_value(), 0);
    }
}
