//! CLI entrypoint for the superseq certification harness.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use superseq_core::{RangeSpec, Sampler, StrategyKind};
use superseq_harness::drivers::{
    self, BIG_GRID, CERTIFY_FULL_GRID, CERTIFY_QUICK_GRID, SHORT_GRID,
};
use superseq_harness::report::CertificationReport;
use superseq_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

/// Certification tooling for the superseq engine.
#[derive(Debug, Parser)]
#[command(name = "superseq")]
#[command(about = "Distinct-sequence generation and certification harness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Strategy selection: a single engine or the whole mixing family.
#[derive(Debug, Clone)]
enum StrategyArg {
    All,
    One(StrategyKind),
}

impl StrategyArg {
    fn resolve(&self) -> Vec<StrategyKind> {
        match self {
            // Super0 is distinctness-only; sweeps cover the mixing levels.
            Self::All => vec![
                StrategyKind::Super1,
                StrategyKind::Super2,
                StrategyKind::Super3,
                StrategyKind::Super4,
            ],
            Self::One(kind) => vec![*kind],
        }
    }
}

impl FromStr for StrategyArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            StrategyKind::from_str(s)
                .map(Self::One)
                .map_err(|e| e.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GridPreset {
    /// Boundary-heavy small ranges; seconds.
    Short,
    /// Large ranges up to the 64-bit boundary; minutes.
    Big,
}

impl GridPreset {
    fn points(self) -> &'static [(u64, u64)] {
        match self {
            Self::Short => &SHORT_GRID,
            Self::Big => &BIG_GRID,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CertifyPreset {
    /// 8/16-bit certification points.
    Quick,
    /// Everything up to the 64-bit boundary.
    Full,
}

impl CertifyPreset {
    fn points(self) -> &'static [(u64, u64)] {
        match self {
            Self::Quick => &CERTIFY_QUICK_GRID,
            Self::Full => &CERTIFY_FULL_GRID,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Full => "full",
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one sequence, one value per line, for visual inspection.
    Generate {
        /// Inclusive upper bound of the range.
        #[arg(long)]
        n: u64,
        /// Index of the last sample (k + 1 values are produced).
        #[arg(long)]
        k: u64,
        /// Engine strategy (super0..super4). Always explicit; there is no
        /// default.
        #[arg(long, value_parser = StrategyKind::from_str)]
        strategy: StrategyKind,
        /// Explicit seed; omitted means system entropy.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Uniqueness sweep over a parameter grid.
    Distinctness {
        #[arg(long, value_enum)]
        preset: GridPreset,
        /// super0..super4, or `all` for the mixing family.
        #[arg(long)]
        strategy: StrategyArg,
        /// Seeded runs per case.
        #[arg(long, default_value_t = 3)]
        runs: u64,
    },
    /// Range-bound and sample-count sweep over a parameter grid.
    Bounds {
        #[arg(long, value_enum)]
        preset: GridPreset,
        /// super0..super4, or `all` for the mixing family.
        #[arg(long)]
        strategy: StrategyArg,
        /// Seeded runs per case.
        #[arg(long, default_value_t = 3)]
        runs: u64,
    },
    /// Fixed seeds must pin the sequence; varying seeds must move it.
    SeedEffect {
        /// Inclusive upper bound; large ranges make collisions negligible.
        #[arg(long, default_value_t = u64::MAX)]
        n: u64,
        /// Index of the last sample.
        #[arg(long, default_value_t = 3)]
        k: u64,
        /// super0..super4, or `all` for the mixing family.
        #[arg(long)]
        strategy: StrategyArg,
        #[arg(long, default_value_t = 10)]
        runs: u64,
    },
    /// OPERM5 + uniformity certification sweep, one thread per strategy.
    Certify {
        #[arg(long, value_enum)]
        preset: CertifyPreset,
        /// super0..super4, or `all` for the mixing family.
        #[arg(long)]
        strategy: StrategyArg,
        /// Seeded runs per case.
        #[arg(long, default_value_t = 3)]
        runs: u64,
        /// Write the report as JSON.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Write the report as a markdown table.
        #[arg(long)]
        markdown: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let mut log = LogEmitter::stdout();

    match cli.command {
        Command::Generate { n, k, strategy, seed } => {
            let spec = RangeSpec::new(n, k);
            let mut sampler = match seed {
                Some(seed) => Sampler::with_seed(spec, strategy, seed),
                None => Sampler::from_entropy(spec, strategy),
            };
            for _ in 0..sampler.sample_count() {
                println!("{}", sampler.next());
            }
            Ok(true)
        }
        Command::Distinctness { preset, strategy, runs } => {
            let mut clean = true;
            for kind in strategy.resolve() {
                for &(n, k) in preset.points() {
                    let outcome = drivers::run_distinctness(RangeSpec::new(n, k), runs, kind);
                    let pass = outcome.failures == 0;
                    clean &= pass;
                    log.emit(
                        &LogEntry::new(
                            if pass { LogLevel::Info } else { LogLevel::Error },
                            "distinctness",
                        )
                        .with_case(kind.name(), n, k)
                        .with_outcome(if pass { Outcome::Pass } else { Outcome::Fail })
                        .with_detail(format!("{}/{} runs failed", outcome.failures, outcome.runs)),
                    )?;
                }
            }
            Ok(clean)
        }
        Command::Bounds { preset, strategy, runs } => {
            let mut clean = true;
            for kind in strategy.resolve() {
                for &(n, k) in preset.points() {
                    let outcome = drivers::run_bounds(RangeSpec::new(n, k), runs, kind);
                    let pass = outcome.failures == 0;
                    clean &= pass;
                    log.emit(
                        &LogEntry::new(
                            if pass { LogLevel::Info } else { LogLevel::Error },
                            "bounds",
                        )
                        .with_case(kind.name(), n, k)
                        .with_outcome(if pass { Outcome::Pass } else { Outcome::Fail })
                        .with_detail(format!("{}/{} runs failed", outcome.failures, outcome.runs)),
                    )?;
                }
            }
            Ok(clean)
        }
        Command::SeedEffect { n, k, strategy, runs } => {
            let mut clean = true;
            for kind in strategy.resolve() {
                let outcome = drivers::run_seed_effect(RangeSpec::new(n, k), runs, kind);
                let pass = outcome.fixed_seed_stable && outcome.varying_seed_distinct;
                clean &= pass;
                log.emit(
                    &LogEntry::new(
                        if pass { LogLevel::Info } else { LogLevel::Error },
                        "seed-effect",
                    )
                    .with_case(kind.name(), n, k)
                    .with_outcome(if pass { Outcome::Pass } else { Outcome::Fail })
                    .with_detail(format!(
                        "fixed_seed_stable={} varying_seed_distinct={}",
                        outcome.fixed_seed_stable, outcome.varying_seed_distinct
                    )),
                )?;
            }
            Ok(clean)
        }
        Command::Certify { preset, strategy, runs, report, markdown } => {
            let entries = drivers::certify(preset.points(), &strategy.resolve(), runs)?;
            for entry in &entries {
                log.emit(
                    &LogEntry::new(LogLevel::Info, "certify")
                        .with_case(&entry.strategy, entry.n, entry.k)
                        .with_detail(format!(
                            "operm5_p={:.4} uniform_p={:.4}",
                            entry.operm5_p, entry.uniform_p
                        )),
                )?;
            }
            let report_data = CertificationReport::new(preset.name(), runs, entries);
            if let Some(path) = report {
                report_data.write_json(&path)?;
            }
            if let Some(path) = markdown {
                report_data.write_markdown(&path)?;
            }
            Ok(true)
        }
    }
}
