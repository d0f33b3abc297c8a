//! Sequence drivers: repeated engine runs over parameter grids, fed into
//! the validation engine and summarized per (strategy, N, K) case.
//!
//! Every driver is deterministic: run `r` of a case always uses seed `r`,
//! so a sweep can be re-executed and diffed. Distinct engine instances
//! share no state, which is what lets the certification sweep fan one
//! thread out per strategy.

use std::collections::BTreeSet;
use std::thread;

use parking_lot::Mutex;
use thiserror::Error;

use superseq_core::stats::{StatsError, binned_uniformity_p, permutation_uniformity_p};
use superseq_core::{RangeSpec, Sampler, StrategyKind};

use crate::report::CertificationEntry;

/// Fraction of the requested samples scored by the uniformity driver.
const UNIFORM_STOP_RATE: f64 = 0.125;

/// Driver failure: statistics preconditions or report I/O.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("validation failed: {0}")]
    Stats(#[from] StatsError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Boundary-heavy (N, K) grid for quick sweeps.
pub const SHORT_GRID: [(u64, u64); 14] = [
    (0, 0),
    (1, 1),
    (1, 0),
    (3, 3),
    (4, 4),
    (5, 4),
    (10, 2),
    (100, 10),
    (100, 50),
    (100, 100),
    (127, 127),
    (128, 128),
    (255, 255),
    (256, 256),
];

/// Large-range grid; takes minutes at the deeper mixing levels.
pub const BIG_GRID: [(u64, u64); 4] = [
    (100_000_000, 1_000_000),
    (u64::MAX, 100_000),
    (1_000_000, 10_000),
    (1_000, 1_000),
];

/// Certification points at the 8/16-bit boundaries.
pub const CERTIFY_QUICK_GRID: [(u64, u64); 3] = [(255, 255), (65_535, 255), (65_535, 65_535)];

/// Full certification sweep up to the 64-bit boundary.
pub const CERTIFY_FULL_GRID: [(u64, u64); 8] = [
    (255, 255),
    (65_535, 255),
    (65_535, 65_535),
    (100_000_000, 1_000_000),
    (4_294_967_295, 255),
    (4_294_967_295, 65_535),
    (u64::MAX, 255),
    (u64::MAX, 65_535),
];

/// Uniqueness sweep over `runs` seeded instances of one case.
#[derive(Debug, Clone, Copy)]
pub struct DistinctnessOutcome {
    pub runs: u64,
    pub failures: u64,
}

pub fn run_distinctness(spec: RangeSpec, runs: u64, kind: StrategyKind) -> DistinctnessOutcome {
    let mut failures = 0;
    for seed in 0..runs {
        let mut sampler = Sampler::with_seed(spec, kind, seed);
        let count = sampler.sample_count();
        let mut unique = BTreeSet::new();
        for _ in 0..count {
            unique.insert(sampler.next());
        }
        if unique.len() as u64 != count {
            failures += 1;
        }
    }
    DistinctnessOutcome { runs, failures }
}

/// Range-bound and sample-count sweep over one case.
#[derive(Debug, Clone, Copy)]
pub struct BoundsOutcome {
    pub runs: u64,
    pub failures: u64,
}

pub fn run_bounds(spec: RangeSpec, runs: u64, kind: StrategyKind) -> BoundsOutcome {
    let mut failures = 0;
    for seed in 0..runs {
        let mut sampler = Sampler::with_seed(spec, kind, seed);
        let count = sampler.sample_count();

        let expected = if spec.k == u64::MAX { spec.k } else { spec.k + 1 };
        if count != expected {
            failures += 1;
        }
        for _ in 0..count {
            if sampler.next() > spec.n {
                failures += 1;
                break;
            }
        }
    }
    BoundsOutcome { runs, failures }
}

/// Seed-effect sweep: a fixed seed must pin the sequence, varying seeds
/// must move it.
#[derive(Debug, Clone, Copy)]
pub struct SeedEffectOutcome {
    /// Same seed reproduced identical first and last elements every run.
    pub fixed_seed_stable: bool,
    /// Distinct seeds produced more than one first or last element.
    pub varying_seed_distinct: bool,
}

pub fn run_seed_effect(spec: RangeSpec, runs: u64, kind: StrategyKind) -> SeedEffectOutcome {
    let endpoints = |seed: u64| -> (u64, u64) {
        let mut sampler = Sampler::with_seed(spec, kind, seed);
        let count = sampler.sample_count();
        let first = sampler.next();
        let mut last = first;
        for _ in 1..count {
            last = sampler.next();
        }
        (first, last)
    };

    let mut firsts = BTreeSet::new();
    let mut lasts = BTreeSet::new();
    for _ in 0..runs {
        let (first, last) = endpoints(1);
        firsts.insert(first);
        lasts.insert(last);
    }
    let fixed_seed_stable = firsts.len() == 1 && lasts.len() == 1;

    firsts.clear();
    lasts.clear();
    for seed in 0..runs {
        let (first, last) = endpoints(seed);
        firsts.insert(first);
        lasts.insert(last);
    }
    let varying_seed_distinct = firsts.len() > 1 || lasts.len() > 1;

    SeedEffectOutcome {
        fixed_seed_stable,
        varying_seed_distinct,
    }
}

/// Mean p-value over seeded runs.
#[derive(Debug, Clone, Copy)]
pub struct ScoreOutcome {
    pub runs: u64,
    pub mean_p: f64,
}

/// OPERM5 score of the full requested sequence, averaged over runs.
pub fn run_operm5(
    spec: RangeSpec,
    runs: u64,
    kind: StrategyKind,
) -> Result<ScoreOutcome, StatsError> {
    let mut sum = 0.0;
    for seed in 0..runs {
        let mut sampler = Sampler::with_seed(spec, kind, seed);
        let count = sampler.sample_count();
        let sequence: Vec<u64> = (0..count).map(|_| sampler.next()).collect();
        sum += permutation_uniformity_p(&sequence)?;
    }
    Ok(ScoreOutcome {
        runs,
        mean_p: sum / runs as f64,
    })
}

/// Uniformity score of the first eighth of the sequence, averaged over
/// runs. Scoring a prefix keeps the sweep honest: a generator that is only
/// uniform once the range is nearly exhausted fails here.
pub fn run_uniform(
    spec: RangeSpec,
    runs: u64,
    kind: StrategyKind,
) -> Result<ScoreOutcome, StatsError> {
    let mut sum = 0.0;
    for seed in 0..runs {
        let mut sampler = Sampler::with_seed(spec, kind, seed);
        let take = ((sampler.sample_count() as f64 * UNIFORM_STOP_RATE) as u64).max(1);
        let prefix: Vec<u64> = (0..take).map(|_| sampler.next()).collect();
        sum += binned_uniformity_p(&prefix, sampler.min_value(), sampler.max_value())?;
    }
    Ok(ScoreOutcome {
        runs,
        mean_p: sum / runs as f64,
    })
}

/// Full certification sweep: OPERM5 + uniformity for every (strategy,
/// point) pair, one worker thread per strategy.
pub fn certify(
    points: &[(u64, u64)],
    strategies: &[StrategyKind],
    runs: u64,
) -> Result<Vec<CertificationEntry>, DriverError> {
    let collected: Mutex<Vec<Result<CertificationEntry, StatsError>>> = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for &kind in strategies {
            let collected = &collected;
            scope.spawn(move || {
                for &(n, k) in points {
                    let spec = RangeSpec::new(n, k);
                    let entry = run_operm5(spec, runs, kind).and_then(|operm5| {
                        let uniform = run_uniform(spec, runs, kind)?;
                        Ok(CertificationEntry {
                            strategy: kind.name().to_string(),
                            n,
                            k,
                            runs,
                            operm5_p: operm5.mean_p,
                            uniform_p: uniform.mean_p,
                        })
                    });
                    collected.lock().push(entry);
                }
            });
        }
    });

    let mut entries = collected
        .into_inner()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
    // Thread interleaving is nondeterministic; the report order is not.
    entries.sort_by(|a, b| (&a.strategy, a.n, a.k).cmp(&(&b.strategy, b.n, b.k)));
    Ok(entries)
}
