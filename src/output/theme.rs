//! Theme and color definitions for rich output.

use crate::compare::Tone;
use rich_rust::r#box::ROUNDED;
use rich_rust::prelude::*;

fn color(name: &str) -> Color {
    Color::parse(name).unwrap_or_else(|_| panic!("Invalid color name: {name}"))
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub improvement: Style,
    pub regression: Style,
    pub warning: Style,
    pub caution: Style,
    pub dimmed: Style,
    pub neutral: Style,

    pub benchmark_name: Style,
    pub aggregate_label: Style,

    pub table_header: Style,
    pub table_border: Style,
    pub table_title: Style,

    pub box_style: &'static BoxChars,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            improvement: Style::new().color(color("green")),
            regression: Style::new().color(color("red")),
            warning: Style::new().color(color("red")).bold(),
            caution: Style::new().color(color("yellow")).bold(),
            dimmed: Style::new().dim(),
            neutral: Style::new(),

            benchmark_name: Style::new().bold(),
            aggregate_label: Style::new().color(color("cyan")).bold(),

            table_header: Style::new().bold(),
            table_border: Style::new().color(color("bright_black")),
            table_title: Style::new().color(color("cyan")).bold(),

            box_style: &ROUNDED,
        }
    }
}

impl Theme {
    /// Style for a cell of the given tone.
    #[must_use]
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Neutral => self.neutral.clone(),
            Tone::Improvement => self.improvement.clone(),
            Tone::Regression => self.regression.clone(),
            Tone::Warning => self.warning.clone(),
            Tone::Caution => self.caution.clone(),
            Tone::Dimmed => self.dimmed.clone(),
        }
    }
}
