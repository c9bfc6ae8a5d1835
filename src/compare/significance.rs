//! Significance gating: decide whether the t-test result can be trusted.

use super::CompareSettings;
use super::ratio::Tone;
use super::stats::SignificanceTest;
use serde::Serialize;
use std::fmt;

/// Marker shown in place of a p-value when a side has too few runs.
pub const INSUFFICIENT_RUNS_MARKER: &str = "˅";

/// Outcome of the gated significance check for one benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Significance {
    /// Either side ran for less than the minimum total runtime.
    RunTimeTooShort,
    /// Either side has fewer successful runs than the minimum.
    InsufficientRuns,
    /// The test found a significant difference.
    Significant { p_value: f64 },
    /// Enough data, but the difference is not significant.
    NotSignificant { p_value: f64 },
}

impl Significance {
    /// Run the decision chain; the first matching rule wins.
    #[must_use]
    pub fn assess(
        old: &[f64],
        new: &[f64],
        settings: &CompareSettings,
        test: &dyn SignificanceTest,
    ) -> Self {
        let old_runtime: f64 = old.iter().sum();
        let new_runtime: f64 = new.iter().sum();
        if old_runtime < settings.min_runtime_ns || new_runtime < settings.min_runtime_ns {
            return Self::RunTimeTooShort;
        }
        if old.len() < settings.min_iterations || new.len() < settings.min_iterations {
            return Self::InsufficientRuns;
        }

        let p_value = test.p_value(old, new);
        if p_value < settings.p_value_threshold {
            Self::Significant { p_value }
        } else {
            Self::NotSignificant { p_value }
        }
    }

    #[must_use]
    pub const fn is_significant(&self) -> bool {
        matches!(self, Self::Significant { .. })
    }

    #[must_use]
    pub const fn p_value(&self) -> Option<f64> {
        match self {
            Self::Significant { p_value } | Self::NotSignificant { p_value } => Some(*p_value),
            Self::RunTimeTooShort | Self::InsufficientRuns => None,
        }
    }

    #[must_use]
    pub const fn tone(&self) -> Tone {
        match self {
            Self::RunTimeTooShort | Self::Significant { .. } => Tone::Neutral,
            Self::InsufficientRuns | Self::NotSignificant { .. } => Tone::Caution,
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunTimeTooShort => f.write_str("(run time too short)"),
            Self::InsufficientRuns => f.write_str(INSUFFICIENT_RUNS_MARKER),
            Self::Significant { p_value } | Self::NotSignificant { p_value } => {
                write!(f, "{p_value:.4}")
            }
        }
    }
}
