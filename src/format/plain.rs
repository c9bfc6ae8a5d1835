//! Plain-text rendering of a [`Report`] as ASCII grids.

use super::grid::{Align, Grid, GridCell, GridLine};
use super::report::{
    CHANGE_TITLE, CONTEXT_TITLE, ITEM_TITLE, LATENCY_TITLE, P_VALUE_TITLE, PARAMETER_TITLE,
    Report, ReportRow, THROUGHPUT_TITLE,
};

/// Label in the first column of the footnote lines.
const NOTES_LABEL: &str = "Notes";

/// The context overview grid.
#[must_use]
pub fn context_grid(report: &Report) -> Grid {
    let mut grid = Grid::new(vec![Align::Left, Align::Left, Align::Left]).title(CONTEXT_TITLE);
    grid.push(vec![
        GridCell::plain(PARAMETER_TITLE),
        GridCell::plain(&report.old_label),
        GridCell::plain(&report.new_label),
    ]);
    grid.separator();

    for entry in &report.context {
        let tone = entry.status.tone();
        grid.push(vec![
            GridCell::new(entry.label(), tone),
            GridCell::plain(&entry.old),
            GridCell::plain(&entry.new),
        ]);
    }
    grid
}

/// The comparison grid: two header lines, benchmark rows, aggregates and
/// footnotes.
#[must_use]
pub fn comparison_grid(report: &Report) -> Grid {
    let mut columns = vec![Align::Right; 8];
    columns[0] = Align::Left;
    let mut grid = Grid::new(columns);

    grid.push(vec![
        GridCell::plain(ITEM_TITLE),
        GridCell::plain(LATENCY_TITLE).span(2).align(Align::Left),
        GridCell::plain(CHANGE_TITLE),
        GridCell::plain(THROUGHPUT_TITLE).span(2).align(Align::Left),
        GridCell::plain(CHANGE_TITLE),
        GridCell::plain(P_VALUE_TITLE),
    ]);
    grid.push(vec![
        GridCell::empty(),
        GridCell::plain("old"),
        GridCell::plain("new"),
        GridCell::empty(),
        GridCell::plain("old"),
        GridCell::plain("new"),
        GridCell::empty(),
        GridCell::empty(),
    ]);
    grid.separator();

    for row in &report.rows {
        grid.push(row_cells(row));
    }
    grid.separator();
    for row in &report.summary {
        grid.push(row_cells(row));
    }

    if !report.notes.is_empty() {
        grid.separator();
        for (index, note) in report.notes.iter().enumerate() {
            let label = if index == 0 { NOTES_LABEL } else { "" };
            grid.push(vec![
                GridCell::plain(label).align(Align::Right),
                GridCell::plain(note.to_string()).span(7).align(Align::Left),
            ]);
        }
    }

    grid
}

fn row_cells(row: &ReportRow) -> Vec<GridCell> {
    row.cells
        .iter()
        .map(|cell| GridCell::new(&cell.text, cell.tone))
        .collect()
}

/// Render both grids, separated by a blank line.
#[must_use]
pub fn render_lines(report: &Report) -> Vec<GridLine> {
    let mut lines = context_grid(report).render();
    lines.push(GridLine {
        text: String::new(),
        tones: Vec::new(),
    });
    lines.extend(comparison_grid(report).render());
    lines
}

/// Render the report as plain text.
#[must_use]
pub fn render_plain(report: &Report) -> String {
    render_lines(report)
        .into_iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}
