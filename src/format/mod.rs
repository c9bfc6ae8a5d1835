//! Report formatting for `bench_compare`.
//!
//! A [`Comparison`](crate::compare::Comparison) is first assembled into a
//! [`Report`] of toned cells, then rendered as:
//! - plain ASCII grids ([`plain`])
//! - a fenced `diff` block for review comments ([`diff`])
//! - machine-readable JSON ([`JsonReport`])
//!
//! Rich terminal tables live in [`crate::output`].

pub mod diff;
pub mod grid;
mod output;
pub mod plain;
pub mod report;

pub use diff::render_diff;
pub use grid::{Align, Grid, GridCell, GridLine, GridRow};
pub use output::{JsonNote, JsonReport};
pub use plain::{comparison_grid, context_grid, render_lines, render_plain};
pub use report::{Note, Report, ReportCell, ReportRow, RowKind};
