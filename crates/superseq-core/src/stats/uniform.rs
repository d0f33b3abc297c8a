//! Binned uniformity test over a declared value range.
//!
//! All values are dropped into 128 equal-width buckets; the empirical
//! frequencies are compared against the flat 1/128 profile with a Pearson
//! chi-squared, converted to a p-value through the complementary error
//! function under the normal approximation. Under that approximation the
//! result is not clamped to [0, 1] for extreme statistics.

use super::StatsError;
use super::special::erf;

/// Number of equal-width histogram buckets.
const NBINS: usize = 128;

/// Uniformity p-value of `sequence` over the declared `[min, max]` range.
///
/// Requires a non-empty sequence and `max > min` (a zero-width bucket is a
/// precondition violation, not a computable case). A sample equal to `max`
/// lands in the last bucket.
pub fn binned_uniformity_p(sequence: &[u64], min: u64, max: u64) -> Result<f64, StatsError> {
    if sequence.is_empty() {
        return Err(StatsError::EmptySequence);
    }
    if max <= min {
        return Err(StatsError::EmptyRange { min, max });
    }

    let bin_width = (max as f64 - min as f64) / NBINS as f64;
    let mut counts = [0u64; NBINS];
    for &v in sequence {
        let index = ((v as f64 - min as f64) / bin_width) as usize;
        counts[index.min(NBINS - 1)] += 1;
    }

    let theory = 1.0 / NBINS as f64;
    let total = sequence.len() as f64;
    let chi2: f64 = counts
        .iter()
        .map(|&c| {
            let h = c as f64 / total;
            let d = h - theory;
            d * d / theory
        })
        .sum();

    Ok(1.0 - erf(chi2 / (2.0 * NBINS as f64 - 2.0).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_an_error() {
        assert_eq!(
            binned_uniformity_p(&[], 0, 100),
            Err(StatsError::EmptySequence)
        );
    }

    #[test]
    fn zero_width_range_is_an_error() {
        assert_eq!(
            binned_uniformity_p(&[1, 2, 3], 7, 7),
            Err(StatsError::EmptyRange { min: 7, max: 7 })
        );
        assert!(binned_uniformity_p(&[1], 9, 3).is_err());
    }

    #[test]
    fn exact_per_bucket_counts_score_the_maximum() {
        // 0..128 over a declared [0, 128] range: one sample per bucket,
        // chi-squared 0, p = 1 - erf(0) = 1.
        let seq: Vec<u64> = (0..128).collect();
        let p = binned_uniformity_p(&seq, 0, 128).unwrap();
        assert!((p - 1.0).abs() < 1e-12, "balanced histogram scored {p}");

        // Several passes per bucket keep the score maximal.
        let seq: Vec<u64> = (0..1280).map(|i| i % 128).collect();
        let p = binned_uniformity_p(&seq, 0, 128).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn concentrated_sequence_scores_the_minimum() {
        let seq = vec![0u64; 4096];
        let p = binned_uniformity_p(&seq, 0, u32::MAX as u64).unwrap();
        assert!(p < 1e-6, "single-bucket pileup scored {p}");
    }

    #[test]
    fn top_edge_sample_lands_in_the_last_bucket() {
        // v == max maps to index NBINS and must clamp, not panic.
        let p = binned_uniformity_p(&[0, 1000], 0, 1000).unwrap();
        assert!(p.is_finite());
    }
}
