//! Structured logging for driver workflows.
//!
//! One JSONL record per driver event, written to stdout or a file. Records
//! carry the strategy/range context so sweep output can be diffed and
//! aggregated without parsing free-form text.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Driver outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

/// Canonical JSONL log record.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Short machine-readable event name, e.g. `"distinctness"`.
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LogEntry {
    #[must_use]
    pub fn new(level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            level,
            event: event.into(),
            strategy: None,
            n: None,
            k: None,
            outcome: None,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_case(mut self, strategy: &str, n: u64, k: u64) -> Self {
        self.strategy = Some(strategy.to_string());
        self.n = Some(n);
        self.k = Some(k);
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Writes JSONL lines to stdout or a file.
pub struct LogEmitter {
    out: Box<dyn Write>,
}

impl LogEmitter {
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            out: Box::new(io::stdout()),
        }
    }

    pub fn to_file(path: &Path) -> io::Result<Self> {
        Ok(Self {
            out: Box::new(BufWriter::new(File::create(path)?)),
        })
    }

    pub fn emit(&mut self, entry: &LogEntry) -> io::Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(self.out, "{line}")
    }
}
