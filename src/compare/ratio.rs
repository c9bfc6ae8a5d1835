//! Change ratios, their percent rendering, and tone classification.

use serde::{Serialize, Serializer};
use std::fmt;

/// Default half-width of the band around 1.0 treated as "no change".
pub const DEFAULT_NEUTRAL_BAND: f64 = 0.05;

/// Semantic colour of a report cell.
///
/// The core only decides the tone; the output layer maps it to a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Improvement,
    Regression,
    /// Configuration mismatch that may invalidate the comparison.
    Warning,
    /// Enough data, but no significant difference (or not enough data).
    Caution,
    /// Subordinate information (unsuccessful-run rows).
    Dimmed,
}

/// Which direction of change is desirable for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Latency: a ratio below 1 is an improvement.
    LowerIsBetter,
    /// Throughput: a ratio above 1 is an improvement.
    HigherIsBetter,
}

/// A new/old ratio that may be undefined (zero or missing denominator).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ratio {
    Defined(f64),
    #[default]
    Undefined,
}

impl Ratio {
    /// Build `numerator / denominator`, undefined unless the denominator is
    /// positive and both values are present and finite.
    #[must_use]
    pub fn between(numerator: Option<f64>, denominator: Option<f64>) -> Self {
        match (numerator, denominator) {
            (Some(num), Some(den)) if den > 0.0 && num.is_finite() && den.is_finite() => {
                Self::Defined(num / den)
            }
            _ => Self::Undefined,
        }
    }

    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Defined(value) => Some(value),
            Self::Undefined => None,
        }
    }

    #[must_use]
    pub const fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Percent change of `r - 1`, e.g. `+12%`, `-7%`, `+0%`; `None` when
    /// undefined.
    #[must_use]
    pub fn format_change(self) -> Option<String> {
        self.value().map(format_change)
    }

    /// Classify the change for a metric with the given polarity.
    #[must_use]
    pub fn tone(self, polarity: Polarity, neutral_band: f64) -> Tone {
        self.value()
            .map_or(Tone::Neutral, |r| classify(r, polarity, neutral_band))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format_change() {
            Some(change) => f.write_str(&change),
            None => Ok(()),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Defined(value) => serializer.serialize_some(value),
            Self::Undefined => serializer.serialize_none(),
        }
    }
}

/// Render a ratio as a signed whole-number percent change.
#[must_use]
pub fn format_change(ratio: f64) -> String {
    let change = (ratio - 1.0) * 100.0;
    if change < 0.0 {
        format!("{change:.0}%")
    } else {
        format!("+{change:.0}%")
    }
}

/// Whether a ratio lies inside the neutral band `(1 - band, 1 + band]`.
#[must_use]
pub fn is_neutral(ratio: f64, neutral_band: f64) -> bool {
    ratio > 1.0 - neutral_band && ratio <= 1.0 + neutral_band
}

/// Classify a ratio as neutral, improvement or regression.
#[must_use]
pub fn classify(ratio: f64, polarity: Polarity, neutral_band: f64) -> Tone {
    if is_neutral(ratio, neutral_band) {
        return Tone::Neutral;
    }
    let increased = ratio >= 1.0;
    match (polarity, increased) {
        (Polarity::HigherIsBetter, true) | (Polarity::LowerIsBetter, false) => Tone::Improvement,
        (Polarity::HigherIsBetter, false) | (Polarity::LowerIsBetter, true) => Tone::Regression,
    }
}
