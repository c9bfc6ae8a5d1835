//! Report assembly: turns a [`Comparison`] into display cells.
//!
//! The assembled [`Report`] is renderer-agnostic. Each cell carries its text
//! and its [`Tone`]; the plain grid, the diff block and the rich tables all
//! render from the same report.

use crate::compare::{
    Aggregate, Comparison, ComparisonRow, ContextEntry, Ratio, Tone, UnsuccessfulRow,
};
use crate::model::NANOS_PER_MILLI;
use serde::Serialize;
use std::fmt;

/// Marker appended to change cells of rows that hit their iteration ceiling.
pub const CAPPED_MARKER: &str = "˄";
/// Label of the subordinate unsuccessful-runs row.
pub const UNSUCCESSFUL_LABEL: &str = "   unsucc.:";
pub const SUM_LABEL: &str = "Sum";
pub const GEOMEAN_LABEL: &str = "Geomean";

pub const ITEM_TITLE: &str = "Item";
pub const LATENCY_TITLE: &str = "Latency (ms/iter)";
pub const THROUGHPUT_TITLE: &str = "Throughput (iter/s)";
pub const CHANGE_TITLE: &str = "Change";
pub const P_VALUE_TITLE: &str = "p-value";
pub const CONTEXT_TITLE: &str = "Configuration Overview";
pub const PARAMETER_TITLE: &str = "Parameter";

/// Number of cells in every comparison row.
pub const COLUMN_COUNT: usize = 8;

/// A formatted value and its semantic tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportCell {
    pub text: String,
    pub tone: Tone,
}

impl ReportCell {
    #[must_use]
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    #[must_use]
    pub fn blank() -> Self {
        Self::new("", Tone::Neutral)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Benchmark,
    Unsuccessful,
    Aggregate,
}

/// One line of the comparison table.
///
/// Cells in order: item, latency old, latency new, latency change,
/// throughput old, throughput new, throughput change, p-value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub kind: RowKind,
    pub cells: Vec<ReportCell>,
}

/// A footnote explaining a marker used in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "note", rename_all = "snake_case")]
pub enum Note {
    Capped { max_runs: Option<u64> },
    InsufficientRuns,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capped {
                max_runs: Some(max_runs),
            } => write!(f, "{CAPPED_MARKER} Execution stopped at {max_runs} runs"),
            Self::Capped { max_runs: None } => {
                write!(f, "{CAPPED_MARKER} Execution stopped at the run limit")
            }
            Self::InsufficientRuns => write!(
                f,
                "{} Insufficient number of runs for p-value calculation",
                crate::compare::significance::INSUFFICIENT_RUNS_MARKER
            ),
        }
    }
}

/// The assembled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Column header of the old side in the context overview.
    pub old_label: String,
    pub new_label: String,
    pub context: Vec<ContextEntry>,
    pub rows: Vec<ReportRow>,
    pub summary: Vec<ReportRow>,
    pub notes: Vec<Note>,
}

impl Report {
    /// Assemble the display cells of a comparison.
    #[must_use]
    pub fn assemble(
        comparison: &Comparison,
        old_label: impl Into<String>,
        new_label: impl Into<String>,
    ) -> Self {
        let mut rows = Vec::with_capacity(comparison.rows.len());
        for row in &comparison.rows {
            rows.push(benchmark_row(row));
            if let Some(unsuccessful) = &row.unsuccessful {
                rows.push(unsuccessful_row(unsuccessful));
            }
        }

        let mut notes = Vec::new();
        if comparison.capped {
            notes.push(Note::Capped {
                max_runs: comparison.max_runs,
            });
        }
        if comparison.insufficient_runs {
            notes.push(Note::InsufficientRuns);
        }

        Self {
            old_label: old_label.into(),
            new_label: new_label.into(),
            context: comparison.context.clone(),
            rows,
            summary: summary_rows(&comparison.aggregate),
            notes,
        }
    }

    /// All table rows: benchmarks first, then the aggregates.
    pub fn all_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().chain(&self.summary)
    }
}

fn benchmark_row(row: &ComparisonRow) -> ReportRow {
    let marker = if row.capped { CAPPED_MARKER } else { " " };
    ReportRow {
        kind: RowKind::Benchmark,
        cells: vec![
            ReportCell::new(&row.name, Tone::Neutral),
            latency_cell(row.old_latency_ns, Tone::Neutral),
            latency_cell(row.new_latency_ns, Tone::Neutral),
            change_cell(row.latency_ratio, row.latency_tone, marker),
            throughput_cell(row.old_throughput, Tone::Neutral),
            throughput_cell(row.new_throughput, Tone::Neutral),
            change_cell(row.throughput_ratio, row.throughput_tone, marker),
            ReportCell::new(row.significance.to_string(), row.significance.tone()),
        ],
    }
}

fn unsuccessful_row(row: &UnsuccessfulRow) -> ReportRow {
    ReportRow {
        kind: RowKind::Unsuccessful,
        cells: vec![
            ReportCell::new(UNSUCCESSFUL_LABEL, Tone::Dimmed),
            latency_cell(row.old_latency_ns, Tone::Dimmed),
            latency_cell(row.new_latency_ns, Tone::Dimmed),
            change_cell(row.latency_ratio, Tone::Dimmed, " "),
            throughput_cell(row.old_rate, Tone::Dimmed),
            throughput_cell(row.new_rate, Tone::Dimmed),
            change_cell(row.rate_ratio, Tone::Dimmed, " "),
            ReportCell::new("", Tone::Dimmed),
        ],
    }
}

fn summary_rows(aggregate: &Aggregate) -> Vec<ReportRow> {
    let sum = ReportRow {
        kind: RowKind::Aggregate,
        cells: vec![
            ReportCell::new(SUM_LABEL, Tone::Neutral),
            latency_cell(Some(aggregate.old_total_ns), Tone::Neutral),
            latency_cell(Some(aggregate.new_total_ns), Tone::Neutral),
            change_cell(aggregate.latency_ratio, aggregate.latency_tone, " "),
            ReportCell::blank(),
            ReportCell::blank(),
            ReportCell::blank(),
            ReportCell::blank(),
        ],
    };

    let geomean = ReportRow {
        kind: RowKind::Aggregate,
        cells: vec![
            ReportCell::new(GEOMEAN_LABEL, Tone::Neutral),
            ReportCell::blank(),
            ReportCell::blank(),
            ReportCell::blank(),
            ReportCell::blank(),
            ReportCell::blank(),
            change_cell(aggregate.throughput_geomean, aggregate.throughput_tone, " "),
            ReportCell::blank(),
        ],
    };

    vec![sum, geomean]
}

/// Milliseconds with one decimal, blank when absent.
#[must_use]
pub fn format_latency_ms(nanos: Option<f64>) -> String {
    nanos.map_or_else(String::new, |ns| format!("{:.1}", ns / NANOS_PER_MILLI))
}

/// Two decimals, blank when absent.
#[must_use]
pub fn format_throughput(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.2}"))
}

fn latency_cell(nanos: Option<f64>, tone: Tone) -> ReportCell {
    ReportCell::new(format_latency_ms(nanos), tone)
}

fn throughput_cell(value: Option<f64>, tone: Tone) -> ReportCell {
    ReportCell::new(format_throughput(value), tone)
}

/// The percent change followed by a one-cell marker; blank when undefined.
fn change_cell(ratio: Ratio, tone: Tone, marker: &str) -> ReportCell {
    match ratio.format_change() {
        Some(change) => ReportCell::new(format!("{change}{marker}"), tone),
        None => ReportCell::new("", Tone::Neutral),
    }
}
