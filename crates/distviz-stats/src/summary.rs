use distviz_catalog::ContinuousModel;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Mean, standard deviation and skewness of a distribution.
///
/// Each field is resolved independently: a moment that does not exist, or
/// that evaluates to a non-finite number, is [`Value::UNDEFINED`] without
/// affecting the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub mean: Value,
    pub std_dev: Value,
    pub skewness: Value,
}

/// Computes the [`SummaryStatistics`] of `model`.
///
/// # Examples
///
/// ```
/// use distviz_catalog::{DistributionFamily, DistributionInstance, ParameterSet};
/// use distviz_stats::{summary::summary_statistics, value::Value};
///
/// let family = DistributionFamily::Cauchy;
/// let cauchy = DistributionInstance::new(family, &ParameterSet::defaults(family)).unwrap();
/// let summary = summary_statistics(&cauchy);
/// assert_eq!(summary.mean, Value::UNDEFINED);
/// assert_eq!(summary.skewness, Value::UNDEFINED);
/// ```
pub fn summary_statistics<M>(model: &M) -> SummaryStatistics
where
    M: ContinuousModel + ?Sized,
{
    let summary = SummaryStatistics {
        mean: Value::from_option(model.mean()),
        std_dev: Value::from_option(model.std_dev()),
        skewness: Value::from_option(model.skewness()),
    };
    tracing::debug!(
        mean = %summary.mean,
        std_dev = %summary.std_dev,
        skewness = %summary.skewness,
        "summary statistics computed"
    );
    summary
}
