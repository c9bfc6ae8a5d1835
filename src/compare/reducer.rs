//! Benchmark row reducer: one comparison row per aligned record pair.

use super::CompareSettings;
use super::ratio::{Polarity, Ratio, Tone};
use super::significance::Significance;
use super::stats::{SignificanceTest, mean};
use crate::model::{BenchmarkMode, BenchmarkRecord, NANOS_PER_SECOND, RunSet};
use serde::Serialize;
use tracing::{debug, trace};

/// Derived comparison of one benchmark; lives only for report assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// `name`, or `old -> new` when the aligned records disagree.
    pub name: String,
    /// Mean successful-run duration (ns), absent when there were no runs.
    pub old_latency_ns: Option<f64>,
    pub new_latency_ns: Option<f64>,
    pub latency_ratio: Ratio,
    pub latency_tone: Tone,
    pub old_throughput: Option<f64>,
    pub new_throughput: Option<f64>,
    pub throughput_ratio: Ratio,
    pub throughput_tone: Tone,
    pub significance: Significance,
    /// Either side hit its `max_runs` ceiling.
    pub capped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsuccessful: Option<UnsuccessfulRow>,
}

/// Statistics of the failed iterations of a benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsuccessfulRow {
    pub old_count: usize,
    pub new_count: usize,
    pub old_latency_ns: Option<f64>,
    pub new_latency_ns: Option<f64>,
    pub latency_ratio: Ratio,
    /// Failed iterations per second.
    pub old_rate: Option<f64>,
    pub new_rate: Option<f64>,
    pub rate_ratio: Ratio,
}

/// Rows plus the report-scope flags accumulated while reducing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reduction {
    pub rows: Vec<ComparisonRow>,
    /// At least one row hit its iteration ceiling.
    pub capped_seen: bool,
    /// At least one row had too few runs for the significance test.
    pub insufficient_seen: bool,
}

/// Reduces aligned benchmark pairs into comparison rows.
pub struct Reducer<'a> {
    old: &'a RunSet,
    new: &'a RunSet,
    mode: BenchmarkMode,
    settings: &'a CompareSettings,
    test: &'a dyn SignificanceTest,
}

impl<'a> Reducer<'a> {
    #[must_use]
    pub fn new(
        old: &'a RunSet,
        new: &'a RunSet,
        mode: BenchmarkMode,
        settings: &'a CompareSettings,
        test: &'a dyn SignificanceTest,
    ) -> Self {
        Self {
            old,
            new,
            mode,
            settings,
            test,
        }
    }

    /// Reduce every benchmark pair, positionally aligned.
    #[must_use]
    pub fn reduce(&self) -> Reduction {
        let mut reduction = Reduction::default();

        for (old, new) in self.old.benchmarks.iter().zip(&self.new.benchmarks) {
            let row = self.reduce_pair(old, new);
            reduction.capped_seen |= row.capped;
            reduction.insufficient_seen |= row.significance == Significance::InsufficientRuns;
            reduction.rows.push(row);
        }

        reduction
    }

    /// Reduce a single aligned pair.
    #[must_use]
    pub fn reduce_pair(&self, old: &BenchmarkRecord, new: &BenchmarkRecord) -> ComparisonRow {
        let name = if old.name == new.name {
            old.name.clone()
        } else {
            format!("{} -> {}", old.name, new.name)
        };

        let old_durations = old.successful_durations();
        let new_durations = new.successful_durations();
        let old_latency_ns = positive_mean(&old_durations);
        let new_latency_ns = positive_mean(&new_durations);

        let latency_ratio = Ratio::between(new_latency_ns, old_latency_ns);
        let throughput_ratio = Ratio::between(new.items_per_second, old.items_per_second);
        let significance =
            Significance::assess(&old_durations, &new_durations, self.settings, self.test);
        let capped = self.is_capped(old, new);

        trace!(
            benchmark = %name,
            latency = ?latency_ratio,
            throughput = ?throughput_ratio,
            ?significance,
            capped,
            "Reduced benchmark pair"
        );

        ComparisonRow {
            latency_tone: latency_ratio.tone(Polarity::LowerIsBetter, self.settings.neutral_band),
            throughput_tone: throughput_ratio
                .tone(Polarity::HigherIsBetter, self.settings.neutral_band),
            unsuccessful: self.unsuccessful_row(old, new),
            name,
            old_latency_ns,
            new_latency_ns,
            latency_ratio,
            old_throughput: old.items_per_second,
            new_throughput: new.items_per_second,
            throughput_ratio,
            significance,
            capped,
        }
    }

    /// A side is capped when its own positive ceiling was reached.
    fn is_capped(&self, old: &BenchmarkRecord, new: &BenchmarkRecord) -> bool {
        let reached = |set: &RunSet, record: &BenchmarkRecord| {
            set.max_runs()
                .is_some_and(|max| record.executed_iterations() as u64 >= max)
        };
        reached(self.old, old) || reached(self.new, new)
    }

    fn unsuccessful_row(
        &self,
        old: &BenchmarkRecord,
        new: &BenchmarkRecord,
    ) -> Option<UnsuccessfulRow> {
        if !old.has_unsuccessful_runs() && !new.has_unsuccessful_runs() {
            return None;
        }

        let old_latency_ns = positive_mean(&old.unsuccessful_durations());
        let new_latency_ns = positive_mean(&new.unsuccessful_durations());
        let old_rate = self.unsuccessful_rate(self.old, old);
        let new_rate = self.unsuccessful_rate(self.new, new);

        let both_failed = old.has_unsuccessful_runs() && new.has_unsuccessful_runs();
        let (latency_ratio, rate_ratio) = if both_failed {
            (
                Ratio::between(new_latency_ns, old_latency_ns),
                Ratio::between(new_rate, old_rate),
            )
        } else {
            (Ratio::Undefined, Ratio::Undefined)
        };

        debug!(
            benchmark = %old.name,
            old_failed = old.unsuccessful_runs.len(),
            new_failed = new.unsuccessful_runs.len(),
            mode = %self.mode,
            "Benchmark recorded unsuccessful runs"
        );

        Some(UnsuccessfulRow {
            old_count: old.unsuccessful_runs.len(),
            new_count: new.unsuccessful_runs.len(),
            old_latency_ns,
            new_latency_ns,
            latency_ratio,
            old_rate,
            new_rate,
            rate_ratio,
        })
    }

    /// Failed iterations per second of elapsed wall time.
    ///
    /// Ordered runs divide by the benchmark's own duration; shuffled runs
    /// interleave all benchmarks, so only the run-set total is meaningful.
    #[allow(clippy::cast_precision_loss)]
    fn unsuccessful_rate(&self, set: &RunSet, record: &BenchmarkRecord) -> Option<f64> {
        let elapsed_secs = match self.mode {
            BenchmarkMode::Ordered => record
                .duration
                .filter(|ns| *ns > 0.0)
                .map(|ns| ns / NANOS_PER_SECOND),
            BenchmarkMode::Shuffled => set.total_duration_secs(),
        }?;
        Some(record.unsuccessful_runs.len() as f64 / elapsed_secs)
    }
}

fn positive_mean(values: &[f64]) -> Option<f64> {
    mean(values).filter(|m| *m > 0.0)
}
