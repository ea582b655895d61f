//! Noncentral chi-square and noncentral t distributions.
//!
//! Both are Poisson mixtures. Sums run over [`poisson_window`] around the
//! Poisson mode, so large noncentralities cost more terms but do not underflow
//! the way a sum started at `j = 0` would. The window grows with the square
//! root of the Poisson mean, so the noncentralities are capped to keep every
//! evaluation to a few thousand terms.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::{beta::beta_reg, gamma::gamma_lr, gamma::ln_gamma};

use super::{ContinuousModel, check};
use crate::{
    CatalogError, DistributionFamily,
    numeric::{Support, ln_poisson_weight, poisson_window, standard_normal_cdf},
    range::RangeRule,
};

/// Largest noncentrality `λ` of the noncentral chi-square.
pub const MAX_CHI_SQUARE_NONCENTRALITY: f64 = 1e4;

/// Largest `|δ|` of the noncentral t; the Poisson mean is `δ²/2`.
pub const MAX_T_NONCENTRALITY: f64 = 100.0;

/// Noncentral chi-square distribution with integer degrees of freedom `k ≥ 1`
/// and noncentrality `λ ≥ 0`.
///
/// `f(x) = Σ_j Pois(j; λ/2) · χ²_{k+2j}(x)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoncentralChiSquare {
    df: f64,
    noncentrality: f64,
}

impl NoncentralChiSquare {
    #[expect(clippy::cast_precision_loss)]
    pub fn new(df: u64, noncentrality: f64) -> Result<Self, CatalogError> {
        let family = DistributionFamily::NoncentralChiSquare;
        check(family, df >= 1, || format!("df must be >= 1, got {df}"))?;
        check(
            family,
            (0.0..=MAX_CHI_SQUARE_NONCENTRALITY).contains(&noncentrality),
            || {
                format!(
                    "noncentrality must be in [0, {MAX_CHI_SQUARE_NONCENTRALITY}], got {noncentrality}"
                )
            },
        )?;
        Ok(Self {
            df: df as f64,
            noncentrality,
        })
    }

    /// Sums `term(j, weight_j)` over the Poisson(λ/2) mixture.
    #[expect(clippy::cast_precision_loss)]
    fn mixture<F>(&self, term: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let half = 0.5 * self.noncentrality;
        if half == 0.0 {
            return term(0.0);
        }
        let (lo, hi) = poisson_window(half);
        (lo..=hi)
            .map(|j| {
                let j = j as f64;
                let weight = ln_poisson_weight(j, half).exp();
                if weight == 0.0 { 0.0 } else { weight * term(j) }
            })
            .sum()
    }
}

/// Central chi-square density with `nu` degrees of freedom.
fn chi_square_pdf(x: f64, nu: f64) -> f64 {
    let half = 0.5 * nu;
    if x < 0.0 {
        0.0
    } else if x == 0.0 {
        match nu.partial_cmp(&2.0) {
            Some(std::cmp::Ordering::Less) => f64::INFINITY,
            Some(std::cmp::Ordering::Equal) => 0.5,
            _ => 0.0,
        }
    } else {
        ((half - 1.0) * x.ln() - 0.5 * x - half * 2.0_f64.ln() - ln_gamma(half)).exp()
    }
}

impl ContinuousModel for NoncentralChiSquare {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        self.mixture(|j| chi_square_pdf(x, self.df + 2.0 * j))
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        self.mixture(|j| gamma_lr(0.5 * self.df + j, 0.5 * x))
            .clamp(0.0, 1.0)
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }

    fn mean(&self) -> Option<f64> {
        Some(self.df + self.noncentrality)
    }

    fn std_dev(&self) -> Option<f64> {
        Some((2.0 * (self.df + 2.0 * self.noncentrality)).sqrt())
    }

    fn skewness(&self) -> Option<f64> {
        let (k, l) = (self.df, self.noncentrality);
        Some(2.0_f64.powf(1.5) * (k + 3.0 * l) / (k + 2.0 * l).powf(1.5))
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Noncentral t distribution with `ν > 0` degrees of freedom and noncentrality `δ`.
///
/// For `t ≥ 0`, with `x = t² / (t² + ν)` and `μ = δ²/2`:
///
/// `F(t) = Φ(−δ) + ½ Σ_j [p_j I_x(j + ½, ν/2) + q_j I_x(j + 1, ν/2)]`
///
/// where `p_j = e^{−μ} μ^j / j!` and `q_j = δ/√2 · e^{−μ} μ^j / Γ(j + 3/2)`.
/// Negative `t` uses `F(t; ν, δ) = 1 − F(−t; ν, −δ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoncentralT {
    df: f64,
    noncentrality: f64,
}

impl NoncentralT {
    pub fn new(df: f64, noncentrality: f64) -> Result<Self, CatalogError> {
        let family = DistributionFamily::NoncentralT;
        check(family, df.is_finite() && df > 0.0, || {
            format!("df must be > 0, got {df}")
        })?;
        check(family, noncentrality.abs() <= MAX_T_NONCENTRALITY, || {
            format!("|noncentrality| must be <= {MAX_T_NONCENTRALITY}, got {noncentrality}")
        })?;
        Ok(Self { df, noncentrality })
    }

    fn variance(&self) -> Option<f64> {
        let nu = self.df;
        let mean = self.mean()?;
        (nu > 2.0).then(|| nu * (1.0 + self.noncentrality.powi(2)) / (nu - 2.0) - mean * mean)
    }
}

/// CDF of the noncentral t at `t ≥ 0`.
#[expect(clippy::cast_precision_loss)]
fn noncentral_t_cdf_upper(t: f64, nu: f64, delta: f64) -> f64 {
    let normal_part = standard_normal_cdf(-delta);
    if t == 0.0 {
        return normal_part;
    }
    let x = (t * t / (t * t + nu)).min(1.0);
    let b = 0.5 * nu;
    let mu = 0.5 * delta * delta;
    if mu == 0.0 {
        return normal_part + 0.5 * beta_reg(0.5, b, x);
    }
    let (lo, hi) = poisson_window(mu);
    let ln_mu = mu.ln();
    let series = (lo..=hi)
        .map(|j| {
            let j = j as f64;
            let p = ln_poisson_weight(j, mu).exp();
            let q = delta / SQRT_2 * (-mu + j * ln_mu - ln_gamma(j + 1.5)).exp();
            let mut term = 0.0;
            if p != 0.0 {
                term += p * beta_reg(j + 0.5, b, x);
            }
            if q != 0.0 {
                term += q * beta_reg(j + 1.0, b, x);
            }
            term
        })
        .sum::<f64>();
    normal_part + 0.5 * series
}

/// Below this `|t|` the PDF uses its closed form at zero.
const PDF_ORIGIN_TOLERANCE: f64 = 1e-6;

impl ContinuousModel for NoncentralT {
    fn pdf(&self, t: f64) -> f64 {
        let nu = self.df;
        let delta = self.noncentrality;
        if t.abs() < PDF_ORIGIN_TOLERANCE {
            let ln_f0 = ln_gamma(0.5 * (nu + 1.0))
                - ln_gamma(0.5 * nu)
                - 0.5 * delta * delta
                - 0.5 * (nu * PI).ln();
            return ln_f0.exp();
        }
        let wider = Self {
            df: nu + 2.0,
            noncentrality: delta,
        };
        let f = nu / t * (wider.cdf(t * (1.0 + 2.0 / nu).sqrt()) - self.cdf(t));
        f.max(0.0)
    }

    fn cdf(&self, t: f64) -> f64 {
        let value = if t >= 0.0 {
            noncentral_t_cdf_upper(t, self.df, self.noncentrality)
        } else {
            1.0 - noncentral_t_cdf_upper(-t, self.df, -self.noncentrality)
        };
        value.clamp(0.0, 1.0)
    }

    fn support(&self) -> Support {
        Support::REAL_LINE
    }

    fn mean(&self) -> Option<f64> {
        let nu = self.df;
        (nu > 1.0).then(|| {
            self.noncentrality
                * (0.5 * nu).sqrt()
                * (ln_gamma(0.5 * (nu - 1.0)) - ln_gamma(0.5 * nu)).exp()
        })
    }

    fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    fn skewness(&self) -> Option<f64> {
        let nu = self.df;
        if nu <= 3.0 {
            return None;
        }
        let mean = self.mean()?;
        let variance = self.variance()?;
        let d2 = self.noncentrality.powi(2);
        let third = mean * (nu * (2.0 * nu - 3.0 + d2) / ((nu - 2.0) * (nu - 3.0)) - 2.0 * variance);
        Some(third / variance.powf(1.5))
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::CentralQuantiles
    }
}
