//! Numerical helpers shared by the family models.
//!
//! - [`invert_cdf`]: bracketing bisection for families without a closed-form quantile
//! - [`Moments`]: mean / standard deviation / skewness, either closed form or
//!   integrated from a CDF on a grid
//! - [`poisson_window`]: index window holding practically all Poisson mass,
//!   used by the noncentral mixtures

use std::f64::consts::SQRT_2;

use statrs::function::{erf::erfc, gamma::ln_gamma};

/// Support of a continuous distribution. Either bound may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    pub lower: f64,
    pub upper: f64,
}

impl Support {
    pub const REAL_LINE: Self = Self {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };
    pub const POSITIVE: Self = Self {
        lower: 0.0,
        upper: f64::INFINITY,
    };
    pub const UNIT: Self = Self {
        lower: 0.0,
        upper: 1.0,
    };
}

const MAX_EXPANSIONS: usize = 1100;
const BISECTION_STEPS: usize = 300;

/// Finds `x` with `cdf(x) = p` by bracketing and bisection.
///
/// Infinite support bounds are replaced by a bracket grown by doubling steps.
/// Returns `None` when `p` is outside `[0, 1]`, when the CDF produces NaN,
/// or when no finite bracket exists.
///
/// ```
/// use distviz_catalog::numeric::{Support, invert_cdf};
///
/// let q = invert_cdf(|x: f64| 1.0 - (-x).exp(), 0.5, Support::POSITIVE).unwrap();
/// assert!((q - std::f64::consts::LN_2).abs() < 1e-12);
/// ```
pub fn invert_cdf<F>(cdf: F, p: f64, support: Support) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    if !(0.0..=1.0).contains(&p) {
        return None;
    }
    let (mut lo, mut hi) = bracket(&cdf, p, support)?;
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let c = cdf(mid);
        if c.is_nan() {
            return None;
        }
        if c < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let x = 0.5 * (lo + hi);
    tracing::trace!(p, x, "quantile by bisection");
    x.is_finite().then_some(x)
}

fn bracket<F>(cdf: &F, p: f64, support: Support) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let mut lo = if support.lower.is_finite() {
        support.lower
    } else if support.upper.is_finite() {
        support.upper - 1.0
    } else {
        -1.0
    };
    let mut hi = if support.upper.is_finite() {
        support.upper
    } else {
        lo.max(0.0) + 1.0
    };

    if !support.lower.is_finite() {
        let mut step = 1.0;
        let mut expansions = 0;
        loop {
            let c = cdf(lo);
            if c.is_nan() {
                return None;
            }
            if c < p {
                break;
            }
            hi = hi.min(lo);
            step *= 2.0;
            lo -= step;
            expansions += 1;
            if !lo.is_finite() || expansions > MAX_EXPANSIONS {
                return None;
            }
        }
    }
    if !support.upper.is_finite() {
        let mut step = 1.0;
        let mut expansions = 0;
        loop {
            let c = cdf(hi);
            if c.is_nan() {
                return None;
            }
            if c >= p {
                break;
            }
            lo = lo.max(hi);
            step *= 2.0;
            hi += step;
            expansions += 1;
            if !hi.is_finite() || expansions > MAX_EXPANSIONS {
                return None;
            }
        }
    }
    (lo < hi).then_some((lo, hi))
}

/// First three moments in the form reported by the engine.
///
/// A `None` field means the moment does not exist for the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub skewness: Option<f64>,
}

impl Moments {
    /// Integrates moments of a distribution on `[lower, upper]` from its CDF.
    ///
    /// The CDF is sampled on `intervals + 1` points; each interval contributes
    /// its probability mass at its midpoint. Mass outside the bounds is ignored,
    /// so the bounds must hold practically all of it.
    #[expect(clippy::cast_precision_loss)]
    pub fn integrate_cdf<F>(cdf: F, lower: f64, upper: f64, intervals: usize) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let h = (upper - lower) / intervals as f64;
        let mut masses = Vec::with_capacity(intervals);
        let mut prev = cdf(lower);
        for i in 1..=intervals {
            let x = lower + h * i as f64;
            let c = cdf(x);
            let mid = x - 0.5 * h;
            masses.push((mid, (c - prev).max(0.0)));
            prev = c;
        }
        let total = masses.iter().map(|(_, w)| w).sum::<f64>();
        if total <= 0.0 || !total.is_finite() {
            return Self::default();
        }
        let mean = masses.iter().map(|(x, w)| x * w).sum::<f64>() / total;
        let central = |k: i32| {
            masses
                .iter()
                .map(|(x, w)| (x - mean).powi(k) * w)
                .sum::<f64>()
                / total
        };
        let variance = central(2);
        let std_dev = variance.sqrt();
        let skewness = (variance > 0.0).then(|| central(3) / variance.powf(1.5));
        Self {
            mean: Some(mean),
            std_dev: Some(std_dev),
            skewness,
        }
    }
}

/// Standard normal CDF, `Φ(x)`.
#[must_use]
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Inclusive index window `[lo, hi]` outside which the Poisson(`mean`) mass is negligible.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn poisson_window(mean: f64) -> (u64, u64) {
    let spread = 10.0 * mean.sqrt();
    let lo = (mean - spread - 10.0).floor().max(0.0) as u64;
    let hi = (mean + spread + 20.0).ceil() as u64;
    (lo, hi)
}

/// `ln P(J = j)` for `J ~ Poisson(mean)` with `mean > 0`.
#[must_use]
pub fn ln_poisson_weight(j: f64, mean: f64) -> f64 {
    -mean + j * mean.ln() - ln_gamma(j + 1.0)
}
