//! Descriptive statistics and the two-sample significance test.
//!
//! The significance test sits behind the [`SignificanceTest`] trait so the
//! comparison only interprets a probability and never depends on how it was
//! obtained. [`StudentTTest`] is the default: a two-sided, pooled-variance
//! test for independent samples.

use std::f64::consts::PI;

/// Arithmetic mean, `None` for an empty sample.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Unbiased sample variance, `None` for fewer than two values.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(squares / (values.len() - 1) as f64)
}

/// Geometric mean computed in log space, `None` for an empty input or any
/// negative value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn geometric_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| *v < 0.0 || v.is_nan()) {
        return None;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    Some((log_sum / values.len() as f64).exp())
}

/// A two-sample test returning the probability that both samples come from
/// distributions with the same mean.
pub trait SignificanceTest {
    /// Two-sided p-value in `[0, 1]`.
    fn p_value(&self, old: &[f64], new: &[f64]) -> f64;
}

/// Student's t-test for two independent samples with pooled variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentTTest;

impl SignificanceTest for StudentTTest {
    #[allow(clippy::cast_precision_loss)]
    fn p_value(&self, old: &[f64], new: &[f64]) -> f64 {
        let (n1, n2) = (old.len(), new.len());
        if n1 < 2 || n2 < 2 {
            return 1.0;
        }
        let (Some(m1), Some(m2), Some(v1), Some(v2)) =
            (mean(old), mean(new), sample_variance(old), sample_variance(new))
        else {
            return 1.0;
        };

        let df = (n1 + n2 - 2) as f64;
        let pooled = ((n1 - 1) as f64).mul_add(v1, (n2 - 1) as f64 * v2) / df;
        let scale = (pooled * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt();

        if scale == 0.0 {
            // Zero variance on both sides: either identical or trivially different.
            return if (m1 - m2).abs() == 0.0 { 1.0 } else { 0.0 };
        }

        student_t_two_sided(((m1 - m2) / scale).abs(), df)
    }
}

/// Two-sided tail probability of Student's t distribution.
#[must_use]
pub fn student_t_two_sided(t: f64, df: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    let x = df / t.mul_add(t, df);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEF: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the gamma function (Lanczos approximation).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula.
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut acc = LANCZOS_COEF[0];
    for (i, coef) in LANCZOS_COEF.iter().enumerate().skip(1) {
        acc += coef / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Regularized incomplete beta function `I_x(a, b)`.
#[must_use]
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let front = (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b)
        + a * x.ln()
        + b * (1.0 - x).ln())
    .exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

const CF_MAX_ITERATIONS: u32 = 300;
const CF_EPSILON: f64 = 3e-16;
const CF_FLOOR: f64 = 1e-300;

/// Modified Lentz evaluation of the incomplete beta continued fraction.
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let floor = |v: f64| if v.abs() < CF_FLOOR { CF_FLOOR } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 / floor(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=CF_MAX_ITERATIONS {
        let m = f64::from(m);
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / floor(aa.mul_add(d, 1.0));
        c = floor(1.0 + aa / c);
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / floor(aa.mul_add(d, 1.0));
        c = floor(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < CF_EPSILON {
            break;
        }
    }
    h
}
