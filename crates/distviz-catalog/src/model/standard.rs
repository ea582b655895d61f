//! Families whose densities and moments come from `statrs`.
//!
//! Parameterizations follow the explorer's conventions rather than
//! `statrs`': gamma, exponential and Erlang take a *scale*, the Pareto scale is
//! fixed at 1, and the Cauchy has no moments.

use std::f64::consts::{PI, SQRT_2};

use statrs::{
    distribution::{self as sd, Continuous as _, ContinuousCDF as _},
    function::erf::erfc_inv,
    statistics::Distribution as _,
};

use super::{ContinuousModel, check, rejected};
use crate::{CatalogError, DistributionFamily, numeric::Support, range::RangeRule};

/// Number of standard deviations the normal range extends on each side.
const NORMAL_RANGE_SIGMAS: f64 = 4.0;

fn standard_normal_quantile(p: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&p) {
        return None;
    }
    let q = -SQRT_2 * erfc_inv(2.0 * p);
    q.is_finite().then_some(q)
}

/// Normal distribution `N(μ, σ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
    inner: sd::Normal,
}

impl Normal {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, CatalogError> {
        let inner = sd::Normal::new(mean, std_dev).map_err(rejected(DistributionFamily::Normal))?;
        Ok(Self {
            mean,
            std_dev,
            inner,
        })
    }
}

impl ContinuousModel for Normal {
    fn pdf(&self, x: f64) -> f64 {
        self.inner.pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }

    fn support(&self) -> Support {
        Support::REAL_LINE
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        standard_normal_quantile(p).map(|z| self.mean + self.std_dev * z)
    }

    fn mean(&self) -> Option<f64> {
        self.inner.mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.inner.skewness()
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::Fixed {
            start: self.mean - NORMAL_RANGE_SIGMAS * self.std_dev,
            end: self.mean + NORMAL_RANGE_SIGMAS * self.std_dev,
        }
    }
}

/// Gamma distribution with shape `k` and scale `θ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamma {
    inner: sd::Gamma,
}

impl Gamma {
    pub fn new(shape: f64, scale: f64) -> Result<Self, CatalogError> {
        check(DistributionFamily::Gamma, scale > 0.0, || {
            format!("scale must be > 0, got {scale}")
        })?;
        let inner =
            sd::Gamma::new(shape, scale.recip()).map_err(rejected(DistributionFamily::Gamma))?;
        Ok(Self { inner })
    }
}

impl ContinuousModel for Gamma {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 { 0.0 } else { self.inner.pdf(x) }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.inner.cdf(x) }
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }

    fn mean(&self) -> Option<f64> {
        self.inner.mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.inner.skewness()
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Beta distribution on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beta {
    inner: sd::Beta,
}

impl Beta {
    pub fn new(alpha: f64, beta: f64) -> Result<Self, CatalogError> {
        let inner = sd::Beta::new(alpha, beta).map_err(rejected(DistributionFamily::Beta))?;
        Ok(Self { inner })
    }
}

impl ContinuousModel for Beta {
    fn pdf(&self, x: f64) -> f64 {
        if (0.0..=1.0).contains(&x) {
            self.inner.pdf(x)
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else if x >= 1.0 {
            1.0
        } else {
            self.inner.cdf(x)
        }
    }

    fn support(&self) -> Support {
        Support::UNIT
    }

    fn mean(&self) -> Option<f64> {
        self.inner.mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.inner.skewness()
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::Fixed {
            start: 0.0,
            end: 1.0,
        }
    }
}

/// Exponential distribution parameterized by its scale (the mean).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    scale: f64,
    inner: sd::Exp,
}

impl Exponential {
    pub fn new(scale: f64) -> Result<Self, CatalogError> {
        check(DistributionFamily::Exponential, scale > 0.0, || {
            format!("scale must be > 0, got {scale}")
        })?;
        let inner = sd::Exp::new(scale.recip()).map_err(rejected(DistributionFamily::Exponential))?;
        Ok(Self { scale, inner })
    }

    /// Rate `1 / scale`.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.inner.rate()
    }
}

impl ContinuousModel for Exponential {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 { 0.0 } else { self.inner.pdf(x) }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.inner.cdf(x) }
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        (0.0..1.0)
            .contains(&p)
            .then(|| -self.scale * (-p).ln_1p())
    }

    fn mean(&self) -> Option<f64> {
        self.inner.mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.inner.skewness()
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Weibull distribution with shape `c` and scale `λ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weibull {
    shape: f64,
    scale: f64,
    inner: sd::Weibull,
}

impl Weibull {
    pub fn new(shape: f64, scale: f64) -> Result<Self, CatalogError> {
        let inner =
            sd::Weibull::new(shape, scale).map_err(rejected(DistributionFamily::Weibull))?;
        Ok(Self {
            shape,
            scale,
            inner,
        })
    }
}

impl ContinuousModel for Weibull {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 { 0.0 } else { self.inner.pdf(x) }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.inner.cdf(x) }
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        (0.0..1.0)
            .contains(&p)
            .then(|| self.scale * (-(-p).ln_1p()).powf(self.shape.recip()))
    }

    fn mean(&self) -> Option<f64> {
        self.inner.mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.inner.skewness()
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Cauchy distribution with location `x₀` and scale `γ`. No moments exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cauchy {
    location: f64,
    scale: f64,
    inner: sd::Cauchy,
}

impl Cauchy {
    pub fn new(location: f64, scale: f64) -> Result<Self, CatalogError> {
        let inner =
            sd::Cauchy::new(location, scale).map_err(rejected(DistributionFamily::Cauchy))?;
        Ok(Self {
            location,
            scale,
            inner,
        })
    }
}

impl ContinuousModel for Cauchy {
    fn pdf(&self, x: f64) -> f64 {
        self.inner.pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }

    fn support(&self) -> Support {
        Support::REAL_LINE
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        (p > 0.0 && p < 1.0).then(|| self.location + self.scale * (PI * (p - 0.5)).tan())
    }

    fn mean(&self) -> Option<f64> {
        None
    }

    fn std_dev(&self) -> Option<f64> {
        None
    }

    fn skewness(&self) -> Option<f64> {
        None
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::CentralQuantiles
    }
}

/// Chi-square distribution; real degrees of freedom are accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquare {
    inner: sd::ChiSquared,
}

impl ChiSquare {
    pub fn new(df: f64) -> Result<Self, CatalogError> {
        let inner = sd::ChiSquared::new(df).map_err(rejected(DistributionFamily::ChiSquare))?;
        Ok(Self { inner })
    }
}

impl ContinuousModel for ChiSquare {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 { 0.0 } else { self.inner.pdf(x) }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.inner.cdf(x) }
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }

    fn mean(&self) -> Option<f64> {
        self.inner.mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.inner.skewness()
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Log-normal distribution: `ln X ~ N(μ, σ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormal {
    mu: f64,
    sigma: f64,
    inner: sd::LogNormal,
}

impl LogNormal {
    pub fn new(mu: f64, sigma: f64) -> Result<Self, CatalogError> {
        let inner =
            sd::LogNormal::new(mu, sigma).map_err(rejected(DistributionFamily::LogNormal))?;
        Ok(Self { mu, sigma, inner })
    }
}

impl ContinuousModel for LogNormal {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.inner.pdf(x) }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.inner.cdf(x) }
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        standard_normal_quantile(p).map(|z| (self.mu + self.sigma * z).exp())
    }

    fn mean(&self) -> Option<f64> {
        self.inner.mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.inner.skewness()
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Erlang distribution: gamma with an integer shape `k ≥ 1` and scale `θ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Erlang {
    inner: sd::Erlang,
}

impl Erlang {
    pub fn new(shape: u64, scale: f64) -> Result<Self, CatalogError> {
        check(DistributionFamily::Erlang, scale > 0.0, || {
            format!("scale must be > 0, got {scale}")
        })?;
        let inner =
            sd::Erlang::new(shape, scale.recip()).map_err(rejected(DistributionFamily::Erlang))?;
        Ok(Self { inner })
    }
}

impl ContinuousModel for Erlang {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 { 0.0 } else { self.inner.pdf(x) }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.inner.cdf(x) }
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }

    fn mean(&self) -> Option<f64> {
        self.inner.mean()
    }

    fn std_dev(&self) -> Option<f64> {
        self.inner.std_dev()
    }

    fn skewness(&self) -> Option<f64> {
        self.inner.skewness()
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Pareto distribution with shape `b` and unit scale; support `x ≥ 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pareto {
    shape: f64,
    inner: sd::Pareto,
}

impl Pareto {
    pub fn new(shape: f64) -> Result<Self, CatalogError> {
        let inner = sd::Pareto::new(1.0, shape).map_err(rejected(DistributionFamily::Pareto))?;
        Ok(Self { shape, inner })
    }
}

impl ContinuousModel for Pareto {
    fn pdf(&self, x: f64) -> f64 {
        if x < 1.0 { 0.0 } else { self.inner.pdf(x) }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 1.0 { 0.0 } else { self.inner.cdf(x) }
    }

    fn support(&self) -> Support {
        Support {
            lower: 1.0,
            upper: f64::INFINITY,
        }
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        (0.0..1.0)
            .contains(&p)
            .then(|| ((-p).ln_1p() / -self.shape).exp())
    }

    fn mean(&self) -> Option<f64> {
        let b = self.shape;
        (b > 1.0).then(|| b / (b - 1.0))
    }

    fn std_dev(&self) -> Option<f64> {
        let b = self.shape;
        (b > 2.0).then(|| (b / ((b - 1.0).powi(2) * (b - 2.0))).sqrt())
    }

    fn skewness(&self) -> Option<f64> {
        let b = self.shape;
        (b > 3.0).then(|| 2.0 * (1.0 + b) / (b - 3.0) * ((b - 2.0) / b).sqrt())
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::CentralQuantiles
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_normal_quantile_and_range() {
        let normal = Normal::new(1.0, 2.0).unwrap();
        assert_abs_diff_eq!(normal.quantile(0.5).unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(
            normal.range_rule(),
            RangeRule::Fixed {
                start: -7.0,
                end: 9.0
            }
        );
    }

    #[test]
    fn test_gamma_uses_scale() {
        let gamma = Gamma::new(2.0, 2.0).unwrap();
        assert_abs_diff_eq!(gamma.mean().unwrap(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(gamma.std_dev().unwrap(), 8.0_f64.sqrt(), epsilon = 1e-12);
        // scipy.stats.gamma(a=2, scale=2).ppf(0.99)
        assert_abs_diff_eq!(gamma.quantile(0.99).unwrap(), 13.276_704_135_987_6, epsilon = 1e-6);
    }

    #[test]
    fn test_exponential_scale() {
        let exp = Exponential::new(2.0).unwrap();
        assert_abs_diff_eq!(exp.rate(), 0.5);
        assert_abs_diff_eq!(exp.mean().unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(exp.quantile(0.99).unwrap(), 2.0 * 100.0_f64.ln(), epsilon = 1e-12);
        assert!(exp.quantile(1.0).is_none());
    }

    #[test]
    fn test_weibull_quantile_matches_cdf() {
        let weibull = Weibull::new(1.5, 3.0).unwrap();
        let q = weibull.quantile(0.99).unwrap();
        assert_abs_diff_eq!(weibull.cdf(q), 0.99, epsilon = 1e-12);
    }

    #[test]
    fn test_cauchy_has_no_moments() {
        let cauchy = Cauchy::new(0.0, 1.0).unwrap();
        assert!(cauchy.mean().is_none());
        assert!(cauchy.std_dev().is_none());
        assert!(cauchy.skewness().is_none());
        assert_abs_diff_eq!(cauchy.quantile(0.99).unwrap(), 31.820_515_953_773_96, epsilon = 1e-9);
    }

    #[test]
    fn test_lognormal_quantile() {
        let lognormal = LogNormal::new(0.0, 1.0).unwrap();
        assert_abs_diff_eq!(lognormal.quantile(0.5).unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(lognormal.pdf(0.0), 0.0);
    }

    #[test]
    fn test_erlang_matches_gamma() {
        let erlang = Erlang::new(3, 0.5).unwrap();
        let gamma = Gamma::new(3.0, 0.5).unwrap();
        for x in [0.1, 0.5, 1.0, 2.5] {
            assert_abs_diff_eq!(erlang.pdf(x), gamma.pdf(x), epsilon = 1e-12);
            assert_abs_diff_eq!(erlang.cdf(x), gamma.cdf(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pareto_moments_and_quantiles() {
        let pareto = Pareto::new(2.0).unwrap();
        assert_abs_diff_eq!(pareto.mean().unwrap(), 2.0);
        assert!(pareto.std_dev().is_none());
        assert!(pareto.skewness().is_none());
        assert_abs_diff_eq!(pareto.quantile(0.01).unwrap(), 0.99_f64.powf(-0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(pareto.quantile(0.99).unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Gamma::new(0.0, 1.0).is_err());
        assert!(Beta::new(1.0, 0.0).is_err());
        assert!(Exponential::new(0.0).is_err());
        assert!(Erlang::new(0, 1.0).is_err());
        assert!(Pareto::new(-2.0).is_err());
    }
}
