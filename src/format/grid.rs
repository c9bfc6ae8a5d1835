//! Plain ASCII grid rendering.
//!
//! A [`Grid`] is a list of rows over a fixed set of columns. Cells may span
//! several columns; column widths are measured in terminal cells with
//! `unicode-width`, so markers like `≠` and `˄` keep the borders aligned.
//! Rendering keeps the tones of each line's cells so encodings that mark
//! whole lines (the diff block) can be derived without parsing the text.

use crate::compare::Tone;
use unicode_width::UnicodeWidthStr;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One cell of a grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub text: String,
    pub tone: Tone,
    /// Number of columns covered, at least 1.
    pub span: usize,
    /// Overrides the column alignment.
    pub align: Option<Align>,
}

impl GridCell {
    #[must_use]
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            span: 1,
            align: None,
        }
    }

    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Neutral)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::plain("")
    }

    #[must_use]
    pub const fn span(mut self, span: usize) -> Self {
        self.span = if span == 0 { 1 } else { span };
        self
    }

    #[must_use]
    pub const fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridRow {
    Cells(Vec<GridCell>),
    /// A horizontal rule.
    Separator,
}

/// A rendered line plus the tones of the cells printed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLine {
    pub text: String,
    pub tones: Vec<Tone>,
}

impl GridLine {
    fn rule(text: String) -> Self {
        Self {
            text,
            tones: Vec::new(),
        }
    }
}

/// A bordered table, rendered without colour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub title: Option<String>,
    pub columns: Vec<Align>,
    pub rows: Vec<GridRow>,
}

impl Grid {
    #[must_use]
    pub fn new(columns: Vec<Align>) -> Self {
        Self {
            title: None,
            columns,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push(&mut self, cells: Vec<GridCell>) {
        self.rows.push(GridRow::Cells(cells));
    }

    pub fn separator(&mut self) {
        self.rows.push(GridRow::Separator);
    }

    /// Column widths (without padding) fitting every cell.
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.columns.len()];

        for cells in self.cell_rows() {
            let mut column = 0;
            for cell in cells {
                if cell.span == 1 && column < widths.len() {
                    widths[column] = widths[column].max(cell.text.width());
                }
                column += cell.span;
            }
        }

        // Widen the last covered column when a spanning cell does not fit.
        for cells in self.cell_rows() {
            let mut column = 0;
            for cell in cells {
                let end = (column + cell.span).min(widths.len());
                if cell.span > 1 && column < end {
                    let available = spanned_width(&widths[column..end]);
                    let needed = cell.text.width();
                    if needed > available {
                        widths[end - 1] += needed - available;
                    }
                }
                column += cell.span;
            }
        }

        widths
    }

    /// Render the grid into lines.
    #[must_use]
    pub fn render(&self) -> Vec<GridLine> {
        let widths = self.column_widths();
        let rule = border(&widths);
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        lines.push(GridLine::rule(self.title.as_ref().map_or_else(
            || rule.clone(),
            |title| titled_border(&rule, title),
        )));

        for row in &self.rows {
            match row {
                GridRow::Separator => lines.push(GridLine::rule(rule.clone())),
                GridRow::Cells(cells) => lines.push(self.render_cells(cells, &widths)),
            }
        }

        lines.push(GridLine::rule(rule));
        lines
    }

    /// Render the grid into a single string, one line per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.render()
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cell_rows(&self) -> impl Iterator<Item = &Vec<GridCell>> {
        self.rows.iter().filter_map(|row| match row {
            GridRow::Cells(cells) => Some(cells),
            GridRow::Separator => None,
        })
    }

    fn render_cells(&self, cells: &[GridCell], widths: &[usize]) -> GridLine {
        let mut text = String::from("|");
        let mut tones = Vec::with_capacity(cells.len());
        let mut column = 0;

        for cell in cells {
            if column >= widths.len() {
                break;
            }
            let end = (column + cell.span).min(widths.len());
            let width = spanned_width(&widths[column..end]);
            let align = cell.align.unwrap_or(self.columns[column]);
            text.push(' ');
            text.push_str(&pad(&cell.text, width, align));
            text.push_str(" |");
            tones.push(cell.tone);
            column = end;
        }

        // Short rows are filled with empty cells.
        while column < widths.len() {
            text.push(' ');
            text.push_str(&" ".repeat(widths[column]));
            text.push_str(" |");
            column += 1;
        }

        GridLine { text, tones }
    }
}

/// Inner width of a cell covering `widths`, including the inner borders.
fn spanned_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

/// Embed the title at the start of the top border when it fits.
fn titled_border(rule: &str, title: &str) -> String {
    let title_width = title.width();
    if title_width + 2 > rule.len() {
        return rule.to_string();
    }
    let mut line = String::from("+");
    line.push_str(title);
    line.extend(rule.chars().skip(1 + title_width));
    line
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{text}{fill}"),
        Align::Right => format!("{fill}{text}"),
    }
}
