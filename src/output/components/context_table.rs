use crate::format::report::{CONTEXT_TITLE, PARAMETER_TITLE};
use crate::format::Report;
use crate::output::Theme;
use rich_rust::prelude::*;
use rich_rust::renderables::Cell;

/// Renders the context overview: one row per key, differences flagged.
pub struct ContextTable<'a> {
    report: &'a Report,
    theme: &'a Theme,
}

impl<'a> ContextTable<'a> {
    #[must_use]
    pub const fn new(report: &'a Report, theme: &'a Theme) -> Self {
        Self { report, theme }
    }

    #[must_use]
    pub fn build(&self) -> Table {
        let mut table = Table::new()
            .box_style(self.theme.box_style)
            .border_style(self.theme.table_border.clone())
            .header_style(self.theme.table_header.clone())
            .title(Text::styled(CONTEXT_TITLE, self.theme.table_title.clone()))
            .with_column(Column::new(PARAMETER_TITLE).min_width(12))
            .with_column(Column::new(self.report.old_label.as_str()).max_width(40))
            .with_column(Column::new(self.report.new_label.as_str()).max_width(40));

        for entry in &self.report.context {
            let style = self.theme.tone_style(entry.status.tone());
            table.add_row(Row::new(vec![
                Cell::new(Text::styled(entry.label(), style)),
                Cell::new(Text::new(&entry.old)),
                Cell::new(Text::new(&entry.new)),
            ]));
        }

        table
    }
}
