//! Overlapping-permutations test ("OPERM5").
//!
//! Every window of five consecutive values is ranked into one of 5! = 120
//! ordering classes; the class histogram is then checked against uniform
//! with a Pearson chi-squared at 119 degrees of freedom. Sequences drawn
//! uniformly at random without replacement make every ordering equally
//! likely, so a skewed class histogram exposes structure the generator
//! failed to hide.

use super::StatsError;
use super::gamma::chi_squared_p;

/// Window length.
const WINDOW: usize = 5;

/// 5! ordering classes.
const CLASSES: usize = 120;

/// Rank one window into its ordering class: repeatedly take the argmin of
/// the shrinking window, accumulating `class += radix * min_index` with the
/// radix growing 1, 5, 20, 60 (a factorial-number-system encoding,
/// equivalent to the Lehmer code).
fn ordering_class(window: &[u64]) -> usize {
    let mut t = [0u64; WINDOW];
    t.copy_from_slice(&window[..WINDOW]);

    let mut class = 0usize;
    let mut radix = 1usize;
    let mut k = WINDOW;
    while k > 1 {
        let mut min_index = 0usize;
        for j in 1..k {
            if t[j] < t[min_index] {
                min_index = j;
            }
        }
        class += radix * min_index;
        radix *= k;

        // Drop the minimum, shifting the tail left.
        for j in min_index + 1..k {
            t[j - 1] = t[j];
        }
        k -= 1;
    }
    class
}

/// Permutation-uniformity p-value over all sliding 5-windows.
///
/// Requires at least [`WINDOW`] samples. Expected count per class is
/// `(len - 4) / 120`, matching the `len - 4` windows actually tallied.
pub fn permutation_uniformity_p(sequence: &[u64]) -> Result<f64, StatsError> {
    if sequence.len() < WINDOW {
        return Err(StatsError::ShortSequence {
            len: sequence.len(),
            min: WINDOW,
        });
    }

    let mut counts = [0u64; CLASSES];
    for window in sequence.windows(WINDOW) {
        counts[ordering_class(window)] += 1;
    }

    let expected = (sequence.len() - (WINDOW - 1)) as f64 / CLASSES as f64;
    let chi2: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();

    chi_squared_p(chi2, (CLASSES - 1) as u32)
}
