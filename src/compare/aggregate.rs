//! Aggregate summary rows: total latency and geometric-mean throughput.

use super::ratio::{Polarity, Ratio, Tone};
use super::reducer::ComparisonRow;
use super::stats::geometric_mean;
use serde::Serialize;
use tracing::{debug, warn};

/// The `Sum` and `Geomean` rows of a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    /// Sum of the mean successful latencies (ns), undefined means as zero.
    pub old_total_ns: f64,
    pub new_total_ns: f64,
    pub latency_ratio: Ratio,
    pub latency_tone: Tone,
    /// Geometric mean of the defined per-benchmark throughput ratios.
    pub throughput_geomean: Ratio,
    pub throughput_tone: Tone,
}

impl Aggregate {
    /// Fold the reduced rows into the summary rows.
    #[must_use]
    pub fn from_rows(rows: &[ComparisonRow], neutral_band: f64) -> Self {
        let old_total_ns: f64 = rows.iter().filter_map(|row| row.old_latency_ns).sum();
        let new_total_ns: f64 = rows.iter().filter_map(|row| row.new_latency_ns).sum();
        let latency_ratio = Ratio::between(Some(new_total_ns), Some(old_total_ns));

        let throughput_ratios: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.throughput_ratio.value())
            .collect();
        let throughput_geomean = match geometric_mean(&throughput_ratios) {
            Some(value) if value.is_finite() => Ratio::Defined(value),
            _ => {
                warn!(
                    rows = rows.len(),
                    "No defined throughput ratios; geometric mean left blank"
                );
                Ratio::Undefined
            }
        };

        debug!(
            old_total_ns,
            new_total_ns,
            ratios = throughput_ratios.len(),
            "Aggregated comparison rows"
        );

        Self {
            old_total_ns,
            new_total_ns,
            latency_ratio,
            latency_tone: latency_ratio.tone(Polarity::LowerIsBetter, neutral_band),
            throughput_geomean,
            throughput_tone: throughput_geomean.tone(Polarity::HigherIsBetter, neutral_band),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ratio::DEFAULT_NEUTRAL_BAND;
    use crate::compare::significance::Significance;

    fn row(old_ns: Option<f64>, new_ns: Option<f64>, throughput: Ratio) -> ComparisonRow {
        ComparisonRow {
            name: "bench".to_string(),
            old_latency_ns: old_ns,
            new_latency_ns: new_ns,
            latency_ratio: Ratio::between(new_ns, old_ns),
            latency_tone: Tone::Neutral,
            old_throughput: None,
            new_throughput: None,
            throughput_ratio: throughput,
            throughput_tone: Tone::Neutral,
            significance: Significance::RunTimeTooShort,
            capped: false,
            unsuccessful: None,
        }
    }

    #[test]
    fn totals_treat_undefined_means_as_zero() {
        let rows = vec![
            row(Some(100.0), Some(80.0), Ratio::Undefined),
            row(None, Some(20.0), Ratio::Undefined),
        ];
        let aggregate = Aggregate::from_rows(&rows, DEFAULT_NEUTRAL_BAND);
        assert_eq!(aggregate.old_total_ns, 100.0);
        assert_eq!(aggregate.new_total_ns, 100.0);
        assert_eq!(aggregate.latency_ratio, Ratio::Defined(1.0));
        assert_eq!(aggregate.latency_tone, Tone::Neutral);
    }

    #[test]
    fn zero_old_total_leaves_latency_undefined() {
        let rows = vec![row(None, Some(20.0), Ratio::Undefined)];
        let aggregate = Aggregate::from_rows(&rows, DEFAULT_NEUTRAL_BAND);
        assert_eq!(aggregate.latency_ratio, Ratio::Undefined);
    }

    #[test]
    fn geomean_of_reciprocal_ratios_is_one() {
        let rows = vec![
            row(None, None, Ratio::Defined(0.5)),
            row(None, None, Ratio::Defined(2.0)),
            row(None, None, Ratio::Undefined),
        ];
        let aggregate = Aggregate::from_rows(&rows, DEFAULT_NEUTRAL_BAND);
        let geomean = aggregate.throughput_geomean.value().unwrap();
        assert!((geomean - 1.0).abs() < 1e-12);
        assert_eq!(aggregate.throughput_tone, Tone::Neutral);
    }

    #[test]
    fn throughput_gain_is_an_improvement() {
        let rows = vec![
            row(None, None, Ratio::Defined(2.0)),
            row(None, None, Ratio::Defined(2.0)),
        ];
        let aggregate = Aggregate::from_rows(&rows, DEFAULT_NEUTRAL_BAND);
        assert_eq!(aggregate.throughput_tone, Tone::Improvement);
    }

    #[test]
    fn empty_geomean_is_undefined() {
        let aggregate = Aggregate::from_rows(&[], DEFAULT_NEUTRAL_BAND);
        assert_eq!(aggregate.throughput_geomean, Ratio::Undefined);
        assert_eq!(aggregate.latency_ratio, Ratio::Undefined);
        assert_eq!(aggregate.throughput_geomean.to_string(), "");
    }
}
