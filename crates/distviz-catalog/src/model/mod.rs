//! Per-family distribution models.
//!
//! Every family is a small parameter struct implementing [`ContinuousModel`].
//! [`FamilyModel`] is the closed tagged variant over all of them and
//! [`DistributionInstance`] binds one model to the parameters it was built from.
//!
//! - [`standard`] - families backed by `statrs`
//! - [`closed_form`] - log-logistic and power-function families
//! - [`noncentral`] - noncentral chi-square and noncentral t
//! - [`kolmogorov`] - exact two-sided Kolmogorov–Smirnov statistic

use crate::{
    CatalogError, DistributionFamily, ParameterSet, ResolvedParameters,
    numeric::{self, Support},
    range::RangeRule,
};

pub use self::{closed_form::*, kolmogorov::*, noncentral::*, standard::*};

mod closed_form;
mod kolmogorov;
mod noncentral;
mod standard;

/// Capability shared by every family.
///
/// `pdf` and `cdf` are total: points outside the support evaluate to `0`
/// (or `0`/`1` for the CDF). Moments return `None` where they do not exist.
pub trait ContinuousModel {
    fn pdf(&self, x: f64) -> f64;

    fn cdf(&self, x: f64) -> f64;

    fn support(&self) -> Support;

    /// Inverse CDF; `None` when it cannot be determined for `p`.
    ///
    /// The default inverts [`Self::cdf`] numerically.
    fn quantile(&self, p: f64) -> Option<f64> {
        numeric::invert_cdf(|x| self.cdf(x), p, self.support())
    }

    fn mean(&self) -> Option<f64>;

    fn std_dev(&self) -> Option<f64>;

    fn skewness(&self) -> Option<f64>;

    fn range_rule(&self) -> RangeRule;

    /// Evaluates the PDF at every point of `xs` into `out`.
    ///
    /// Identical to calling [`Self::pdf`] point by point.
    fn pdf_into(&self, xs: &[f64], out: &mut [f64]) {
        assert_eq!(xs.len(), out.len(), "output length must match input length");
        for (o, &x) in out.iter_mut().zip(xs) {
            *o = self.pdf(x);
        }
    }

    /// Evaluates the CDF at every point of `xs` into `out`.
    fn cdf_into(&self, xs: &[f64], out: &mut [f64]) {
        assert_eq!(xs.len(), out.len(), "output length must match input length");
        for (o, &x) in out.iter_mut().zip(xs) {
            *o = self.cdf(x);
        }
    }
}

/// One variant per family, each carrying its own parameter struct.
#[derive(Debug, Clone)]
pub enum FamilyModel {
    Normal(Normal),
    Gamma(Gamma),
    Beta(Beta),
    Exponential(Exponential),
    Weibull(Weibull),
    Cauchy(Cauchy),
    ChiSquare(ChiSquare),
    LogNormal(LogNormal),
    Erlang(Erlang),
    Pareto(Pareto),
    LogLogistic(LogLogistic),
    NoncentralChiSquare(NoncentralChiSquare),
    NoncentralT(NoncentralT),
    KolmogorovSmirnov(KolmogorovSmirnov),
    Power(Power),
}

impl FamilyModel {
    /// Builds the model of `params.family()` from validated parameters.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_resolved(params: &ResolvedParameters) -> Result<Self, CatalogError> {
        let family = params.family();
        let p = |i| params.value(i);
        let model = match family {
            DistributionFamily::Normal => Self::Normal(Normal::new(p(0), p(1))?),
            DistributionFamily::Gamma => Self::Gamma(Gamma::new(p(0), p(1))?),
            DistributionFamily::Beta => Self::Beta(Beta::new(p(0), p(1))?),
            DistributionFamily::Exponential => Self::Exponential(Exponential::new(p(0))?),
            DistributionFamily::Weibull => Self::Weibull(Weibull::new(p(0), p(1))?),
            DistributionFamily::Cauchy => Self::Cauchy(Cauchy::new(p(0), p(1))?),
            DistributionFamily::ChiSquare => Self::ChiSquare(ChiSquare::new(p(0))?),
            DistributionFamily::LogNormal => Self::LogNormal(LogNormal::new(p(0), p(1))?),
            DistributionFamily::Erlang => Self::Erlang(Erlang::new(p(0) as u64, p(1))?),
            DistributionFamily::Pareto => Self::Pareto(Pareto::new(p(0))?),
            DistributionFamily::LogLogistic => Self::LogLogistic(LogLogistic::new(p(0))?),
            DistributionFamily::NoncentralChiSquare => {
                Self::NoncentralChiSquare(NoncentralChiSquare::new(p(0) as u64, p(1))?)
            }
            DistributionFamily::NoncentralT => {
                Self::NoncentralT(NoncentralT::new(p(0), p(1))?)
            }
            DistributionFamily::KolmogorovSmirnov => {
                Self::KolmogorovSmirnov(KolmogorovSmirnov::new(p(0) as u64)?)
            }
            DistributionFamily::Power => Self::Power(Power::new(p(0))?),
        };
        Ok(model)
    }

    #[must_use]
    pub fn family(&self) -> DistributionFamily {
        match self {
            Self::Normal(_) => DistributionFamily::Normal,
            Self::Gamma(_) => DistributionFamily::Gamma,
            Self::Beta(_) => DistributionFamily::Beta,
            Self::Exponential(_) => DistributionFamily::Exponential,
            Self::Weibull(_) => DistributionFamily::Weibull,
            Self::Cauchy(_) => DistributionFamily::Cauchy,
            Self::ChiSquare(_) => DistributionFamily::ChiSquare,
            Self::LogNormal(_) => DistributionFamily::LogNormal,
            Self::Erlang(_) => DistributionFamily::Erlang,
            Self::Pareto(_) => DistributionFamily::Pareto,
            Self::LogLogistic(_) => DistributionFamily::LogLogistic,
            Self::NoncentralChiSquare(_) => DistributionFamily::NoncentralChiSquare,
            Self::NoncentralT(_) => DistributionFamily::NoncentralT,
            Self::KolmogorovSmirnov(_) => DistributionFamily::KolmogorovSmirnov,
            Self::Power(_) => DistributionFamily::Power,
        }
    }

    /// The variant's model as a trait object.
    #[must_use]
    pub fn as_model(&self) -> &dyn ContinuousModel {
        match self {
            Self::Normal(m) => m,
            Self::Gamma(m) => m,
            Self::Beta(m) => m,
            Self::Exponential(m) => m,
            Self::Weibull(m) => m,
            Self::Cauchy(m) => m,
            Self::ChiSquare(m) => m,
            Self::LogNormal(m) => m,
            Self::Erlang(m) => m,
            Self::Pareto(m) => m,
            Self::LogLogistic(m) => m,
            Self::NoncentralChiSquare(m) => m,
            Self::NoncentralT(m) => m,
            Self::KolmogorovSmirnov(m) => m,
            Self::Power(m) => m,
        }
    }
}

/// An immutable evaluator bound to one family and one valid parameter set.
///
/// # Example
///
/// ```
/// use distviz_catalog::{ContinuousModel as _, DistributionFamily, DistributionInstance, ParameterSet};
///
/// let params = ParameterSet::from_iter([("mean", 0.0), ("std_dev", 1.0)]);
/// let normal = DistributionInstance::new(DistributionFamily::Normal, &params).unwrap();
/// assert!((normal.cdf(0.0) - 0.5).abs() < 1e-15);
/// assert_eq!(normal.skewness(), Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct DistributionInstance {
    parameters: ResolvedParameters,
    model: FamilyModel,
}

impl DistributionInstance {
    /// Validates `params` against `family`'s schema and builds the model.
    pub fn new(family: DistributionFamily, params: &ParameterSet) -> Result<Self, CatalogError> {
        let parameters = ResolvedParameters::resolve(family, params)?;
        let model = FamilyModel::from_resolved(&parameters)?;
        Ok(Self { parameters, model })
    }

    #[must_use]
    pub fn family(&self) -> DistributionFamily {
        self.model.family()
    }

    /// Parameters after rounding and clamping.
    #[must_use]
    pub fn parameters(&self) -> &ResolvedParameters {
        &self.parameters
    }

    #[must_use]
    pub fn model(&self) -> &FamilyModel {
        &self.model
    }
}

impl ContinuousModel for DistributionInstance {
    fn pdf(&self, x: f64) -> f64 {
        self.model.as_model().pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.model.as_model().cdf(x)
    }

    fn support(&self) -> Support {
        self.model.as_model().support()
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        self.model.as_model().quantile(p)
    }

    fn mean(&self) -> Option<f64> {
        self.model.as_model().mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.model.as_model().std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.model.as_model().skewness()
    }

    fn range_rule(&self) -> RangeRule {
        self.model.as_model().range_rule()
    }

    fn pdf_into(&self, xs: &[f64], out: &mut [f64]) {
        self.model.as_model().pdf_into(xs, out);
    }

    fn cdf_into(&self, xs: &[f64], out: &mut [f64]) {
        self.model.as_model().cdf_into(xs, out);
    }
}

/// Maps a `statrs` constructor error into [`CatalogError::InvalidParameters`].
pub(crate) fn rejected<E>(family: DistributionFamily) -> impl FnOnce(E) -> CatalogError
where
    E: std::fmt::Display,
{
    move |err| CatalogError::invalid(family, err.to_string())
}

/// Ensures a parameter satisfies `ok`, for models constructed outside the schema path.
pub(crate) fn check(
    family: DistributionFamily,
    ok: bool,
    reason: impl FnOnce() -> String,
) -> Result<(), CatalogError> {
    if ok {
        Ok(())
    } else {
        Err(CatalogError::invalid(family, reason()))
    }
}
