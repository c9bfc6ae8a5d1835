use super::report::Note;
use crate::compare::{Aggregate, Comparison, ComparisonRow, ContextEntry};
use crate::model::BenchmarkMode;
use serde::Serialize;

/// Machine-readable report for `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub old: &'a str,
    pub new: &'a str,
    pub mode: BenchmarkMode,
    pub context: &'a [ContextEntry],
    pub benchmarks: &'a [ComparisonRow],
    pub aggregate: &'a Aggregate,
    pub capped: bool,
    pub insufficient_runs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_runs: Option<u64>,
    pub notes: Vec<JsonNote>,
}

/// A footnote with its rendered text.
#[derive(Debug, Clone, Serialize)]
pub struct JsonNote {
    #[serde(flatten)]
    pub note: Note,
    pub text: String,
}

impl<'a> JsonReport<'a> {
    #[must_use]
    pub fn new(comparison: &'a Comparison, old: &'a str, new: &'a str, notes: &[Note]) -> Self {
        Self {
            old,
            new,
            mode: comparison.mode,
            context: &comparison.context,
            benchmarks: &comparison.rows,
            aggregate: &comparison.aggregate,
            capped: comparison.capped,
            insufficient_runs: comparison.insufficient_runs,
            max_runs: comparison.max_runs,
            notes: notes
                .iter()
                .map(|note| JsonNote {
                    note: *note,
                    text: note.to_string(),
                })
                .collect(),
        }
    }
}
