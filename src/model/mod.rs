//! Core data types for `bench_compare`.
//!
//! This module defines the run records consumed by the comparison:
//! - `RunSet` - One side's complete benchmark output (old or new)
//! - `BenchmarkRecord` - Results for one named benchmark
//! - `RunResult` - A single measured iteration
//! - `BenchmarkMode` - Execution discipline (ordered/shuffled)
//!
//! The JSON field names follow the benchmark runner's output
//! (`duration`, `items_per_second`, `summary.total_duration`), with
//! `*_ns` aliases accepted.

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Context key naming the execution discipline.
pub const BENCHMARK_MODE_KEY: &str = "benchmark_mode";
/// Context key naming the per-benchmark iteration ceiling.
pub const MAX_RUNS_KEY: &str = "max_runs";

/// Nanoseconds per second.
pub const NANOS_PER_SECOND: f64 = 1e9;
/// Nanoseconds per millisecond.
pub const NANOS_PER_MILLI: f64 = 1e6;

/// How the benchmark runner scheduled the benchmarks of a run-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchmarkMode {
    /// Each benchmark ran on its own, one after another.
    Ordered,
    /// Benchmark items were interleaved randomly over the whole run.
    Shuffled,
}

impl BenchmarkMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ordered => "Ordered",
            Self::Shuffled => "Shuffled",
        }
    }
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BenchmarkMode {
    type Err = CompareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ordered" => Ok(Self::Ordered),
            "shuffled" => Ok(Self::Shuffled),
            _ => Err(CompareError::InvalidBenchmarkMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// A single iteration's measured cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(alias = "duration_ns")]
    pub duration: f64,
}

impl RunResult {
    #[must_use]
    pub const fn new(duration: f64) -> Self {
        Self { duration }
    }
}

/// Results for one named benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    /// Total wall time of the benchmark in nanoseconds.
    #[serde(default, alias = "duration_ns", skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Throughput of the successful runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_second: Option<f64>,
    #[serde(default)]
    pub successful_runs: Vec<RunResult>,
    #[serde(default)]
    pub unsuccessful_runs: Vec<RunResult>,
}

impl BenchmarkRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: None,
            items_per_second: None,
            successful_runs: Vec::new(),
            unsuccessful_runs: Vec::new(),
        }
    }

    /// Number of executed iterations, successful or not.
    #[must_use]
    pub fn executed_iterations(&self) -> usize {
        self.successful_runs.len() + self.unsuccessful_runs.len()
    }

    #[must_use]
    pub fn successful_durations(&self) -> Vec<f64> {
        self.successful_runs.iter().map(|run| run.duration).collect()
    }

    #[must_use]
    pub fn unsuccessful_durations(&self) -> Vec<f64> {
        self.unsuccessful_runs.iter().map(|run| run.duration).collect()
    }

    #[must_use]
    pub fn has_unsuccessful_runs(&self) -> bool {
        !self.unsuccessful_runs.is_empty()
    }
}

/// Run-set wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Wall time of the whole run-set in nanoseconds.
    #[serde(
        default,
        alias = "total_duration_ns",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_duration: Option<f64>,
}

/// One side's complete benchmark output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSet {
    #[serde(default)]
    pub context: BTreeMap<String, Value>,
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkRecord>,
    #[serde(default)]
    pub summary: RunSummary,
}

impl RunSet {
    /// Parse the run-set's benchmark mode from its context.
    ///
    /// # Errors
    ///
    /// Returns an error if `benchmark_mode` is missing, not a string, or not
    /// one of the recognized modes.
    pub fn benchmark_mode(&self) -> Result<BenchmarkMode> {
        let value = self
            .context
            .get(BENCHMARK_MODE_KEY)
            .ok_or_else(|| CompareError::MissingContextKey {
                key: BENCHMARK_MODE_KEY.to_string(),
            })?;
        match value {
            Value::String(mode) => mode.parse(),
            other => Err(CompareError::InvalidBenchmarkMode {
                mode: other.to_string(),
            }),
        }
    }

    /// The declared iteration ceiling, if positive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn max_runs(&self) -> Option<u64> {
        let value = self.context.get(MAX_RUNS_KEY)?;
        let runs = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))?,
            Value::String(s) => s.trim().parse::<i64>().ok()?,
            _ => return None,
        };
        u64::try_from(runs).ok().filter(|runs| *runs > 0)
    }

    /// Total run-set wall time in seconds, if known and positive.
    #[must_use]
    pub fn total_duration_secs(&self) -> Option<f64> {
        self.summary
            .total_duration
            .filter(|ns| *ns > 0.0)
            .map(|ns| ns / NANOS_PER_SECOND)
    }
}

/// Render a context value the way it appears in reports: strings bare,
/// everything else as compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
