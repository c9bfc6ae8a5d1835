//! Diff-block encoding for review tools.
//!
//! Code review surfaces colour fenced `diff` blocks by their first column,
//! so every report line is prefixed with a marker derived from the tones of
//! its cells.

use super::grid::GridLine;
use crate::compare::Tone;

pub const FENCE_OPEN: &str = "```diff";
pub const FENCE_CLOSE: &str = "```";

/// Marker for a line: `-` when a cell regressed or warns, `+` when a cell
/// improved, a space otherwise.
///
/// A line holding both a regression and an improvement (latency got worse
/// while throughput got better, say) is marked `-`, so a regression is never
/// hidden behind a green line.
#[must_use]
pub fn line_marker(tones: &[Tone]) -> char {
    if tones
        .iter()
        .any(|tone| matches!(tone, Tone::Regression | Tone::Warning))
    {
        '-'
    } else if tones.contains(&Tone::Improvement) {
        '+'
    } else {
        ' '
    }
}

/// Wrap rendered lines in a fenced diff block.
#[must_use]
pub fn render_diff(lines: &[GridLine]) -> String {
    let mut out = String::from(FENCE_OPEN);
    out.push('\n');
    for line in lines {
        out.push(line_marker(&line.tones));
        out.push_str(&line.text);
        out.push('\n');
    }
    out.push_str(FENCE_CLOSE);
    out
}
