//! Distribution catalog for the distviz explorer.
//!
//! This crate knows which probability distribution families exist, what
//! parameters each takes, and how to turn a family plus a parameter set into
//! an evaluator and the x-range it should be plotted over.
//!
//! # Modules
//!
//! - [`family`]: the closed set of families and their parameter schemas
//! - [`parameter`]: parameter domains, caller-side parameter sets and their
//!   validated form
//! - [`model`]: one model per family behind the [`ContinuousModel`] trait
//! - [`range`]: per-family range rules and the evenly spaced evaluation grid
//! - [`numeric`]: quantile inversion, moment integration and other helpers
//!
//! # Example
//!
//! ```
//! use distviz_catalog::{ContinuousModel as _, DistributionFamily, ParameterSet};
//!
//! let family = DistributionFamily::Normal;
//! let (instance, range) = distviz_catalog::build(family, &ParameterSet::defaults(family)).unwrap();
//! assert_eq!(range.len(), 500);
//! assert_eq!(range.start(), Some(-4.0));
//! assert_eq!(range.end(), Some(4.0));
//! assert_eq!(instance.mean(), Some(0.0));
//! ```

pub use self::{
    family::DistributionFamily,
    model::{ContinuousModel, DistributionInstance, FamilyModel},
    parameter::{MAX_ARITY, ParamDomain, ParameterSet, ParameterSpec, ResolvedParameter, ResolvedParameters},
    range::{EVALUATION_POINTS, EvaluationRange, LOWER_PROBABILITY, RangeRule, UPPER_PROBABILITY},
};

pub mod family;
pub mod model;
pub mod numeric;
pub mod parameter;
pub mod range;

/// Errors raised while looking up a family or validating its parameters.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum CatalogError {
    #[display("unknown distribution family '{name}'")]
    UnknownFamily { name: String },
    #[display("invalid parameters for {family}: {reason}")]
    InvalidParameters {
        family: DistributionFamily,
        reason: String,
    },
}

impl CatalogError {
    pub(crate) fn invalid(family: DistributionFamily, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            family,
            reason: reason.into(),
        }
    }
}

/// Parameter schema of `family`, in positional order.
#[must_use]
pub fn schema(family: DistributionFamily) -> &'static [ParameterSpec] {
    family.schema()
}

/// Builds the evaluator for `family` and the range it is evaluated over.
///
/// Parameters are validated and normalized first. The range then follows the
/// family's [`RangeRule`]; a quantile that cannot be determined, or bounds
/// that are not strictly increasing, reject the parameters.
pub fn build(
    family: DistributionFamily,
    params: &ParameterSet,
) -> Result<(DistributionInstance, EvaluationRange), CatalogError> {
    let instance = DistributionInstance::new(family, params)?;
    let (start, end) = range_bounds(&instance)?;
    tracing::debug!(%family, start, end, "evaluation range chosen");
    let range = EvaluationRange::linspace(start, end, EVALUATION_POINTS);
    Ok((instance, range))
}

fn range_bounds(instance: &DistributionInstance) -> Result<(f64, f64), CatalogError> {
    let family = instance.family();
    let quantile = |p: f64| {
        instance
            .quantile(p)
            .filter(|q| q.is_finite())
            .ok_or_else(|| CatalogError::invalid(family, format!("quantile at {p} is undefined")))
    };
    let (start, end) = match instance.range_rule() {
        RangeRule::Fixed { start, end } => (start, end),
        RangeRule::ZeroToUpperQuantile => (0.0, quantile(UPPER_PROBABILITY)?),
        RangeRule::CentralQuantiles => (quantile(LOWER_PROBABILITY)?, quantile(UPPER_PROBABILITY)?),
    };
    if !(start.is_finite() && end.is_finite() && start < end) {
        return Err(CatalogError::invalid(
            family,
            format!("evaluation range [{start}, {end}] is empty"),
        ));
    }
    Ok((start, end))
}
