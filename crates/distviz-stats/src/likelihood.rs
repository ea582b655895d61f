//! Log-likelihood of the exponential rate and its maximum likelihood estimate.
//!
//! For `n` draws with sum `S`, `log L(λ) = n·ln λ − λ·S` and the MLE is `n / S`.

use distviz_catalog::EvaluationRange;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Errors raised by the likelihood computations.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum LikelihoodError {
    #[display("cannot estimate the rate: sample sum is zero")]
    DivisionByZero,
    #[display("sample count must be between 1 and 100000")]
    InvalidSampleCount,
    #[display("sample sum must be finite and non-negative, got {sum}")]
    InvalidSampleSum { sum: f64 },
    #[display("rate must be finite and > 0, got {rate}")]
    InvalidRate { rate: f64 },
}

/// Evenly spaced candidate rates the likelihood surface is evaluated on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateGrid {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Default for RateGrid {
    fn default() -> Self {
        Self {
            start: 0.1,
            end: 10.0,
            count: 1000,
        }
    }
}

impl RateGrid {
    #[must_use]
    pub fn rates(&self) -> Vec<f64> {
        EvaluationRange::linspace(self.start, self.end, self.count).into_points()
    }
}

/// `log L(λ)` at one candidate rate.
///
/// Serialized as a `[rate, logLikelihood]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, Value)", into = "(f64, Value)")]
pub struct LikelihoodPoint {
    pub rate: f64,
    pub log_likelihood: Value,
}

impl From<(f64, Value)> for LikelihoodPoint {
    fn from((rate, log_likelihood): (f64, Value)) -> Self {
        Self {
            rate,
            log_likelihood,
        }
    }
}

impl From<LikelihoodPoint> for (f64, Value) {
    fn from(point: LikelihoodPoint) -> Self {
        (point.rate, point.log_likelihood)
    }
}

/// `n·ln λ − λ·S`, undefined for a non-positive or non-finite rate.
///
/// ```
/// use distviz_stats::likelihood::log_likelihood;
///
/// let ll = log_likelihood(50.0, 100, 2.0);
/// assert_eq!(ll.get(), Some(100.0 * 2.0_f64.ln() - 100.0));
/// assert!(log_likelihood(50.0, 100, 0.0).is_undefined());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn log_likelihood(sample_sum: f64, n: usize, rate: f64) -> Value {
    if !(rate.is_finite() && rate > 0.0) {
        return Value::UNDEFINED;
    }
    Value::new(n as f64 * rate.ln() - rate * sample_sum)
}

/// Evaluates [`log_likelihood`] at every rate of `grid`.
#[must_use]
pub fn likelihood_surface(sample_sum: f64, n: usize, grid: &RateGrid) -> Vec<LikelihoodPoint> {
    grid.rates()
        .into_iter()
        .map(|rate| LikelihoodPoint {
            rate,
            log_likelihood: log_likelihood(sample_sum, n, rate),
        })
        .collect()
}

/// Maximum likelihood estimate of the exponential rate, `n / S`.
#[expect(clippy::cast_precision_loss)]
pub fn mle(sample_sum: f64, n: usize) -> Result<f64, LikelihoodError> {
    if n == 0 {
        return Err(LikelihoodError::InvalidSampleCount);
    }
    if !(sample_sum.is_finite() && sample_sum >= 0.0) {
        return Err(LikelihoodError::InvalidSampleSum { sum: sample_sum });
    }
    if sample_sum == 0.0 {
        return Err(LikelihoodError::DivisionByZero);
    }
    Ok(n as f64 / sample_sum)
}
