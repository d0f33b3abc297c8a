//! Invertible bit transforms.
//!
//! Each function here is a bijection over its fixed bit width, so any
//! composition of them is a bijection too. That composability is what lets
//! the engine thread a monotonic counter through the stack and still
//! guarantee pairwise-distinct outputs.

/// Rounds of the modular half-mix per application. More rounds improve the
/// binned-uniformity scores but not the permutation scores.
pub(crate) const HAD_ROUNDS: u32 = 1;

#[inline]
pub(crate) fn half_mask(half_width: u32) -> u64 {
    (1u64 << half_width) - 1
}

/// XOR-mirror fold: pair each low bit position `i < half_width` with its
/// mirror `j = bit_width - 1 - i`, XOR the two bits and write the result
/// back into both positions.
///
/// Applying it twice restores the input. It erases the high/low asymmetry
/// left by bit concatenation (fresh noise above, counter below).
pub(crate) fn symmetry(x: u64, bit_width: u32, half_width: u32) -> u64 {
    let mut x = x;
    for i in 0..half_width {
        let j = bit_width - 1 - i;
        let bit_i = (x >> i) & 1;
        let bit_j = (x >> j) & 1;
        let t = bit_i ^ bit_j;
        x ^= (t << i) | (t << j);
    }
    x
}

/// Modular half-mix: split at `half_width`, apply
/// `(L, R) <- (L + R, L + 2R) mod 2^half_width`, recombine with the halves
/// swapped.
///
/// The affine map has unit determinant over `Z/2^half_width`, so it is
/// invertible; it diffuses bits across the two halves.
pub(crate) fn hadamard(x: u64, half_width: u32) -> u64 {
    let mask = half_mask(half_width);
    let mut l = x >> half_width;
    let mut r = x & mask;
    for _ in 0..HAD_ROUNDS {
        let l_next = (l + r) & mask;
        let r_next = (l + 2 * r) & mask;
        l = l_next;
        r = r_next;
    }
    (r << half_width) | l
}

/// Flat Feistel: per round `L' = R`, `R' = L ^ R ^ key`, recombine with the
/// halves swapped. Invertible regardless of the key values.
pub(crate) fn flat_feistel(x: u64, half_width: u32, keys: &[u64]) -> u64 {
    let mask = half_mask(half_width);
    let mut l = x >> half_width;
    let mut r = x & mask;
    for &key in keys {
        let r_next = (l ^ r ^ key) & mask;
        l = r;
        r = r_next;
    }
    (r << half_width) | l
}
