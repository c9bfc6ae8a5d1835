//! The comparison pipeline.
//!
//! Two loaded run-sets flow through:
//! 1. the compatibility check (same benchmark mode, same benchmark count),
//! 2. the context differ ([`context`]),
//! 3. the row reducer ([`reducer`]),
//! 4. the aggregator ([`aggregate`]).
//!
//! The result is a [`Comparison`], which the format layer turns into a
//! report. Nothing here performs I/O.

pub mod aggregate;
pub mod context;
pub mod ratio;
pub mod reducer;
pub mod significance;
pub mod stats;

pub use aggregate::Aggregate;
pub use context::{ContextEntry, ContextStatus, diff_contexts};
pub use ratio::{Polarity, Ratio, Tone};
pub use reducer::{ComparisonRow, Reducer, Reduction, UnsuccessfulRow};
pub use significance::Significance;
pub use stats::{SignificanceTest, StudentTTest};

use crate::error::{CompareError, Result};
use crate::model::{BenchmarkMode, RunSet};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Default p-value below which a change counts as significant.
pub const DEFAULT_P_VALUE_THRESHOLD: f64 = 0.001;
/// Default minimum number of successful runs per side.
pub const DEFAULT_MIN_ITERATIONS: usize = 10;
/// Default minimum summed successful runtime per side (59 s).
pub const DEFAULT_MIN_RUNTIME_NS: f64 = 59e9;
/// Context keys expected to differ between any two runs.
pub const DEFAULT_IGNORED_CONTEXT_KEYS: [&str; 2] = ["GIT-HASH", "date"];

/// Thresholds and allow-lists steering the comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareSettings {
    pub p_value_threshold: f64,
    pub min_iterations: usize,
    pub min_runtime_ns: f64,
    pub neutral_band: f64,
    pub ignored_context_keys: Vec<String>,
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            p_value_threshold: DEFAULT_P_VALUE_THRESHOLD,
            min_iterations: DEFAULT_MIN_ITERATIONS,
            min_runtime_ns: DEFAULT_MIN_RUNTIME_NS,
            neutral_band: ratio::DEFAULT_NEUTRAL_BAND,
            ignored_context_keys: DEFAULT_IGNORED_CONTEXT_KEYS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Everything the report assembler needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub mode: BenchmarkMode,
    pub context: Vec<ContextEntry>,
    pub rows: Vec<ComparisonRow>,
    pub aggregate: Aggregate,
    pub capped: bool,
    pub insufficient_runs: bool,
    /// Ceiling quoted in the capped footnote: the new side's, else the old.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_runs: Option<u64>,
}

/// Reject run-sets that cannot be compared row by row.
///
/// # Errors
///
/// Returns an error if either side lacks a valid `benchmark_mode`, the modes
/// differ, or the benchmark counts differ.
pub fn check_compatibility(old: &RunSet, new: &RunSet) -> Result<BenchmarkMode> {
    let old_mode = old.benchmark_mode()?;
    let new_mode = new.benchmark_mode()?;
    if old_mode != new_mode {
        return Err(CompareError::IncompatibleModes {
            old: old_mode,
            new: new_mode,
        });
    }
    if old.benchmarks.len() != new.benchmarks.len() {
        return Err(CompareError::BenchmarkCountMismatch {
            old: old.benchmarks.len(),
            new: new.benchmarks.len(),
        });
    }
    debug!(mode = %old_mode, benchmarks = old.benchmarks.len(), "Run-sets are compatible");
    Ok(old_mode)
}

/// Compare two run-sets.
///
/// # Errors
///
/// Returns an error if the run-sets are not compatible (see
/// [`check_compatibility`]).
pub fn compare(
    old: &RunSet,
    new: &RunSet,
    settings: &CompareSettings,
    test: &dyn SignificanceTest,
) -> Result<Comparison> {
    let mode = check_compatibility(old, new)?;

    let context = diff_contexts(&old.context, &new.context, &settings.ignored_context_keys);
    let flagged = context.iter().filter(|e| e.status.is_flagged()).count();
    if flagged > 0 {
        warn!(flagged, "Run contexts differ");
    }

    let reduction = Reducer::new(old, new, mode, settings, test).reduce();
    let aggregate = Aggregate::from_rows(&reduction.rows, settings.neutral_band);

    info!(
        mode = %mode,
        rows = reduction.rows.len(),
        capped = reduction.capped_seen,
        insufficient_runs = reduction.insufficient_seen,
        "Compared run-sets"
    );

    Ok(Comparison {
        mode,
        context,
        rows: reduction.rows,
        aggregate,
        capped: reduction.capped_seen,
        insufficient_runs: reduction.insufficient_seen,
        max_runs: new.max_runs().or_else(|| old.max_runs()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run_set(value: serde_json::Value) -> RunSet {
        serde_json::from_value(value).expect("run set")
    }

    fn ordered(benchmarks: serde_json::Value) -> RunSet {
        run_set(json!({
            "context": { "benchmark_mode": "Ordered", "max_runs": 5 },
            "benchmarks": benchmarks,
        }))
    }

    #[test]
    fn different_modes_are_rejected() {
        let old = ordered(json!([]));
        let new = run_set(json!({ "context": { "benchmark_mode": "Shuffled" } }));
        let err = compare(&old, &new, &CompareSettings::default(), &StudentTTest).unwrap_err();
        assert!(matches!(
            err,
            CompareError::IncompatibleModes {
                old: BenchmarkMode::Ordered,
                new: BenchmarkMode::Shuffled
            }
        ));
    }

    #[test]
    fn different_counts_are_rejected() {
        let old = ordered(json!([{ "name": "A" }, { "name": "B" }]));
        let new = ordered(json!([{ "name": "A" }]));
        let err = check_compatibility(&old, &new).unwrap_err();
        assert!(matches!(
            err,
            CompareError::BenchmarkCountMismatch { old: 2, new: 1 }
        ));
    }

    #[test]
    fn missing_mode_is_rejected() {
        let old = run_set(json!({ "context": {} }));
        let new = ordered(json!([]));
        assert!(matches!(
            check_compatibility(&old, &new).unwrap_err(),
            CompareError::MissingContextKey { .. }
        ));
    }

    #[test]
    fn comparison_carries_flags_and_max_runs() {
        let runs: Vec<_> = (0..5).map(|_| json!({ "duration": 100 })).collect();
        let old = ordered(json!([{ "name": "A", "items_per_second": 10.0, "successful_runs": runs }]));
        let new = old.clone();

        let comparison =
            compare(&old, &new, &CompareSettings::default(), &StudentTTest).expect("compare");

        assert_eq!(comparison.mode, BenchmarkMode::Ordered);
        assert!(comparison.capped);
        assert!(!comparison.insufficient_runs);
        assert_eq!(comparison.max_runs, Some(5));
        assert_eq!(comparison.rows.len(), 1);
        assert_eq!(comparison.aggregate.throughput_geomean, Ratio::Defined(1.0));
    }

    #[test]
    fn default_settings() {
        let settings = CompareSettings::default();
        assert_eq!(settings.min_iterations, 10);
        assert_eq!(settings.p_value_threshold, 0.001);
        assert_eq!(settings.ignored_context_keys, vec!["GIT-HASH", "date"]);
    }
}
