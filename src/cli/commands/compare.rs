//! The comparison command: load, compare, render.

use crate::compare::{self, CompareSettings, SignificanceTest, StudentTTest};
use crate::config::{self, CliOverrides};
use crate::error::Result;
use crate::format::{JsonReport, Report, render_diff, render_lines};
use crate::load::{InputSource, load_pair};
use crate::output::{ComparisonTable, ContextTable, OutputContext, OutputMode};
use std::path::Path;
use tracing::{debug, info};

/// Inputs of one comparison run.
#[derive(Debug, Clone)]
pub struct CompareArgs<'a> {
    pub old: &'a Path,
    pub new: &'a Path,
    pub overrides: CliOverrides,
}

/// Execute the comparison and print the report.
///
/// # Errors
///
/// Returns an error if configuration or either run-set cannot be loaded, or
/// the run-sets are not comparable.
pub fn execute(args: &CompareArgs<'_>, ctx: &OutputContext) -> Result<()> {
    let layer = config::load_config(Path::new("."), &args.overrides)?;
    let settings = config::settings_from_layer(&layer)?;
    debug!(?settings, "Resolved comparison settings");

    execute_with(args, &settings, &StudentTTest, ctx)
}

/// Execute with explicit settings and significance test.
///
/// # Errors
///
/// Returns an error if either run-set cannot be loaded or the run-sets are
/// not comparable.
pub fn execute_with(
    args: &CompareArgs<'_>,
    settings: &CompareSettings,
    test: &dyn SignificanceTest,
    ctx: &OutputContext,
) -> Result<()> {
    let old_source = InputSource::from_path(args.old);
    let new_source = InputSource::from_path(args.new);
    let (old, new) = load_pair(&old_source, &new_source)?;

    let comparison = compare::compare(&old, &new, settings, test)?;
    let old_label = old_source.to_string();
    let new_label = new_source.to_string();
    let report = Report::assemble(&comparison, &old_label, &new_label);

    info!(mode = ?ctx.mode(), rows = report.rows.len(), "Rendering report");

    match ctx.mode() {
        OutputMode::Json => {
            ctx.json_pretty(&JsonReport::new(
                &comparison,
                &old_label,
                &new_label,
                &report.notes,
            ))?;
        }
        OutputMode::Diff => {
            ctx.print(&render_diff(&render_lines(&report)));
        }
        OutputMode::Plain => {
            ctx.newline();
            for line in render_lines(&report) {
                ctx.print(&line.text);
            }
            ctx.newline();
        }
        OutputMode::Rich => render_rich(&report, ctx),
        OutputMode::Quiet => {}
    }

    Ok(())
}

fn render_rich(report: &Report, ctx: &OutputContext) {
    let theme = ctx.theme();
    ctx.render(&ContextTable::new(report, theme).build());
    ctx.newline();
    ctx.render(&ComparisonTable::new(report, theme).build());

    for note in &report.notes {
        ctx.print(&format!("[italic yellow]{note}[/]"));
    }
}
