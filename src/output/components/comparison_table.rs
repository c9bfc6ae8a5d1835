use crate::format::report::{CHANGE_TITLE, ITEM_TITLE, P_VALUE_TITLE, ReportCell, RowKind};
use crate::format::{Report, ReportRow};
use crate::output::Theme;
use rich_rust::prelude::*;
use rich_rust::renderables::Cell;

/// Renders the per-benchmark comparison with its aggregate rows.
///
/// Rich tables have a single header line, so the latency and throughput
/// groups are folded into the column titles.
pub struct ComparisonTable<'a> {
    report: &'a Report,
    theme: &'a Theme,
}

impl<'a> ComparisonTable<'a> {
    #[must_use]
    pub const fn new(report: &'a Report, theme: &'a Theme) -> Self {
        Self { report, theme }
    }

    #[must_use]
    pub fn build(&self) -> Table {
        let right = |name: &str, width: usize| {
            Column::new(name)
                .justify(JustifyMethod::Right)
                .min_width(width)
        };

        let mut table = Table::new()
            .box_style(self.theme.box_style)
            .border_style(self.theme.table_border.clone())
            .header_style(self.theme.table_header.clone())
            .with_column(Column::new(ITEM_TITLE).min_width(12).max_width(48))
            .with_column(right("Latency old (ms)", 8))
            .with_column(right("Latency new (ms)", 8))
            .with_column(right(CHANGE_TITLE, 7))
            .with_column(right("Throughput old (iter/s)", 9))
            .with_column(right("Throughput new (iter/s)", 9))
            .with_column(right(CHANGE_TITLE, 7))
            .with_column(right(P_VALUE_TITLE, 8));

        for row in &self.report.rows {
            table.add_row(self.row(row));
        }
        for row in &self.report.summary {
            table.add_row(self.row(row));
        }

        table
    }

    fn row(&self, row: &ReportRow) -> Row {
        let cells = row
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| self.cell(row.kind, index, cell))
            .collect();
        Row::new(cells)
    }

    fn cell(&self, kind: RowKind, index: usize, cell: &ReportCell) -> Cell {
        let style = match (kind, index) {
            (RowKind::Benchmark, 0) => self.theme.benchmark_name.clone(),
            (RowKind::Aggregate, 0) => self.theme.aggregate_label.clone(),
            _ => self.theme.tone_style(cell.tone),
        };
        Cell::new(Text::styled(&cell.text, style))
    }
}
