//! End-to-end evaluation of one request: catalog lookup, statistics, curves,
//! markers and, optionally, the exponential likelihood panel.

use distviz_catalog::{CatalogError, DistributionFamily, ParameterSet};
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
    curves::{DerivedCurves, curves},
    descriptive::DescriptiveStats,
    likelihood::{self, LikelihoodError, LikelihoodPoint, RateGrid},
    markers::{ReferenceMarkers, reference_markers},
    sample::{ExponentialSample, SampleSeed},
    summary::{SummaryStatistics, summary_statistics},
    value::Value,
};

/// Sample size used when only the rate is requested.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;
/// Rate used when only the sample size is requested.
pub const DEFAULT_RATE: f64 = 1.0;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant)]
pub enum EvaluationError {
    #[display("{_0}")]
    Catalog(#[error(source)] CatalogError),
    #[display("{_0}")]
    Likelihood(#[error(source)] LikelihoodError),
}

/// Input of [`evaluate`].
///
/// The likelihood panel is computed when either `sample_count` or `rate` is
/// present; the other then takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub family: DistributionFamily,
    #[serde(default)]
    pub parameters: ParameterSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SampleSeed>,
}

impl EvaluationRequest {
    #[must_use]
    pub fn new(family: DistributionFamily, parameters: ParameterSet) -> Self {
        Self {
            family,
            parameters,
            sample_count: None,
            rate: None,
            seed: None,
        }
    }

    #[must_use]
    pub fn wants_likelihood(&self) -> bool {
        self.sample_count.is_some() || self.rate.is_some()
    }
}

/// The log-likelihood panel for an exponential sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikelihoodPanel {
    /// Rate the sample was drawn with.
    pub rate: f64,
    pub sample_count: usize,
    pub seed: SampleSeed,
    pub sample_summary: DescriptiveStats,
    pub grid: Vec<LikelihoodPoint>,
    pub mle: f64,
    /// `log L` at the rate the sample was drawn with.
    pub chosen_log_likelihood: Value,
}

impl LikelihoodPanel {
    /// Draws `sample_count` values from `Exp(rate)` with `seed` and evaluates
    /// the likelihood on the default [`RateGrid`].
    pub fn compute(rate: f64, sample_count: usize, seed: SampleSeed) -> Result<Self, LikelihoodError> {
        let sample = ExponentialSample::with_seed(rate, sample_count, seed)?;
        let sum = sample.sum();
        let n = sample.len();
        let sample_summary = DescriptiveStats::new(sample.values().iter().copied())
            .ok_or(LikelihoodError::InvalidSampleCount)?;
        let mle = likelihood::mle(sum, n)?;
        let grid = likelihood::likelihood_surface(sum, n, &RateGrid::default());
        let chosen_log_likelihood = likelihood::log_likelihood(sum, n, rate);
        tracing::debug!(rate, n, sum, mle, "likelihood panel computed");
        Ok(Self {
            rate,
            sample_count: n,
            seed,
            sample_summary,
            grid,
            mle,
            chosen_log_likelihood,
        })
    }
}

/// Output of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub family: DistributionFamily,
    /// Parameters after rounding and clamping.
    pub parameters: ParameterSet,
    pub summary: SummaryStatistics,
    pub range: Vec<f64>,
    pub curves: DerivedCurves,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<ReferenceMarkers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<LikelihoodPanel>,
}

/// Evaluates `request` end to end.
///
/// Invalid families or parameters and invalid likelihood inputs fail the whole
/// evaluation; undefined statistics and curve points become [`Value::UNDEFINED`].
///
/// # Examples
///
/// ```
/// use distviz_catalog::{DistributionFamily, ParameterSet};
/// use distviz_stats::evaluation::{EvaluationRequest, evaluate};
///
/// let family = DistributionFamily::Gamma;
/// let request = EvaluationRequest::new(family, ParameterSet::defaults(family));
/// let report = evaluate(&request).unwrap();
/// assert_eq!(report.range.len(), 500);
/// assert_eq!(report.curves.len(), 500);
/// assert!(report.likelihood.is_none());
/// ```
pub fn evaluate(request: &EvaluationRequest) -> Result<EvaluationReport, EvaluationError> {
    let family = request.family;
    tracing::debug!(%family, "evaluating");
    let (instance, range) = distviz_catalog::build(family, &request.parameters)?;
    let summary = summary_statistics(&instance);
    let curves = curves(&instance, &range);
    let markers = reference_markers(&summary, &range, &curves.pdf);

    let likelihood = if request.wants_likelihood() {
        let rate = request.rate.unwrap_or(DEFAULT_RATE);
        let sample_count = request.sample_count.unwrap_or(DEFAULT_SAMPLE_COUNT);
        let seed = request.seed.unwrap_or_else(|| rand::rng().random());
        Some(LikelihoodPanel::compute(rate, sample_count, seed)?)
    } else {
        None
    };

    Ok(EvaluationReport {
        family,
        parameters: instance.parameters().to_parameter_set(),
        summary,
        range: range.into_points(),
        curves,
        markers,
        likelihood,
    })
}
