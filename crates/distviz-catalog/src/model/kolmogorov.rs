//! Exact distribution of the two-sided one-sample Kolmogorov–Smirnov statistic `D_n`.
//!
//! `P(D_n < d)` is computed with the Marsaglia–Tsang–Wang matrix method: the
//! answer is the central element of `H^n` scaled by `n!/n^n`, where `H` is a
//! `(2k−1)`-square matrix with `k = ⌊nd⌋ + 1`. Closed forms cover the regions
//! near 0 and 1, and large `n` falls back to the Kolmogorov limit with
//! Stephens' small-sample correction.

use std::{
    f64::consts::{PI, TAU},
    sync::OnceLock,
};

use statrs::function::gamma::ln_gamma;

use super::{ContinuousModel, check};
use crate::{
    CatalogError, DistributionFamily,
    numeric::{Moments, Support},
    range::RangeRule,
};

/// Largest sample size evaluated with the exact matrix method.
const EXACT_MAX_N: u64 = 140;

/// Decimal exponent step used to keep matrix powers in range.
const SCALE_EXPONENT: i32 = 140;
const SCALE: f64 = 1e140;

/// Step of the central difference used for the density.
const PDF_STEP: f64 = 1e-6;

/// Upper-tail probability ignored when integrating the moments.
const MOMENT_TAIL: f64 = 1e-10;
const MOMENT_INTERVALS: usize = 400;

/// Distribution of `D_n = sup |F_n(x) − F(x)|` for a sample of size `n`.
#[derive(Debug, Clone)]
pub struct KolmogorovSmirnov {
    n: u64,
    moments: OnceLock<Moments>,
}

impl PartialEq for KolmogorovSmirnov {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
    }
}

impl KolmogorovSmirnov {
    pub fn new(n: u64) -> Result<Self, CatalogError> {
        check(DistributionFamily::KolmogorovSmirnov, n >= 1, || {
            format!("n must be >= 1, got {n}")
        })?;
        Ok(Self {
            n,
            moments: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn sample_size(&self) -> u64 {
        self.n
    }

    #[expect(clippy::cast_precision_loss)]
    fn moments(&self) -> Moments {
        *self.moments.get_or_init(|| {
            let n = self.n as f64;
            // P(D_n > d) <= 2 exp(-2 n d²)
            let upper = ((2.0 / MOMENT_TAIL).ln() / (2.0 * n)).sqrt().min(1.0);
            tracing::debug!(n = self.n, upper, "integrating Kolmogorov-Smirnov moments");
            Moments::integrate_cdf(|d| self.cdf(d), 0.0, upper, MOMENT_INTERVALS)
        })
    }
}

impl ContinuousModel for KolmogorovSmirnov {
    fn pdf(&self, d: f64) -> f64 {
        if !(0.0..=1.0).contains(&d) {
            return 0.0;
        }
        let lo = (d - PDF_STEP).max(0.0);
        let hi = (d + PDF_STEP).min(1.0);
        ((self.cdf(hi) - self.cdf(lo)) / (hi - lo)).max(0.0)
    }

    #[expect(clippy::cast_precision_loss)]
    fn cdf(&self, d: f64) -> f64 {
        let n = self.n as f64;
        if d.is_nan() {
            return f64::NAN;
        }
        if d <= 0.5 / n {
            return 0.0;
        }
        if d >= 1.0 {
            return 1.0;
        }
        if d <= 1.0 / n {
            // n! (2d - 1/n)^n
            return (ln_gamma(n + 1.0) + n * (2.0 * d - 1.0 / n).ln()).exp();
        }
        if d >= 1.0 - 1.0 / n {
            return 1.0 - 2.0 * (1.0 - d).powf(n);
        }
        if self.n > EXACT_MAX_N {
            let sqrt_n = n.sqrt();
            return kolmogorov_limit((sqrt_n + 0.12 + 0.11 / sqrt_n) * d);
        }
        marsaglia_tsang_wang(self.n, d).clamp(0.0, 1.0)
    }

    fn support(&self) -> Support {
        Support::UNIT
    }

    fn mean(&self) -> Option<f64> {
        self.moments().mean
    }

    fn std_dev(&self) -> Option<f64> {
        self.moments().std_dev
    }

    fn skewness(&self) -> Option<f64> {
        self.moments().skewness
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Dense row-major square matrix.
#[derive(Debug, Clone)]
struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.data[i * self.size + j]
    }

    fn mul(&self, rhs: &Self) -> Self {
        let m = self.size;
        let mut out = Self::zeros(m);
        for i in 0..m {
            for k in 0..m {
                let a = self.at(i, k);
                if a == 0.0 {
                    continue;
                }
                let row = &rhs.data[k * m..(k + 1) * m];
                for (o, &b) in out.data[i * m..(i + 1) * m].iter_mut().zip(row) {
                    *o += a * b;
                }
            }
        }
        out
    }

    fn scale(&mut self, factor: f64) {
        for x in &mut self.data {
            *x *= factor;
        }
    }
}

/// `P(D_n < d)` by the Marsaglia–Tsang–Wang method.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn marsaglia_tsang_wang(n: u64, d: f64) -> f64 {
    let nd = n as f64 * d;
    let k = nd.floor() as usize + 1;
    let m = 2 * k - 1;
    let h = k as f64 - nd;

    let mut matrix = Matrix::zeros(m);
    for i in 0..m {
        for j in 0..m {
            if i + 1 >= j {
                *matrix.at_mut(i, j) = 1.0;
            }
        }
    }
    for i in 0..m {
        *matrix.at_mut(i, 0) -= h.powi(i as i32 + 1);
        *matrix.at_mut(m - 1, i) -= h.powi((m - i) as i32);
    }
    if 2.0 * h - 1.0 > 0.0 {
        *matrix.at_mut(m - 1, 0) += (2.0 * h - 1.0).powi(m as i32);
    }
    let mut factorials = vec![1.0; m + 1];
    for g in 1..=m {
        factorials[g] = factorials[g - 1] * g as f64;
    }
    for i in 0..m {
        for j in 0..=(i + 1).min(m - 1) {
            *matrix.at_mut(i, j) /= factorials[i + 1 - j];
        }
    }

    let (power, mut exponent) = matrix_power(&matrix, n, k - 1);
    let mut s = power.at(k - 1, k - 1);
    let nf = n as f64;
    for i in 1..=n {
        s = s * i as f64 / nf;
        if s < 1.0 / SCALE {
            s *= SCALE;
            exponent -= SCALE_EXPONENT;
        }
    }
    s * 10f64.powi(exponent)
}

/// `base^n` together with the decimal exponent factored out of it.
fn matrix_power(base: &Matrix, n: u64, center: usize) -> (Matrix, i32) {
    if n == 1 {
        return (base.clone(), 0);
    }
    let (half, half_exponent) = matrix_power(base, n / 2, center);
    let mut result = half.mul(&half);
    let mut exponent = 2 * half_exponent;
    if n % 2 == 1 {
        result = base.mul(&result);
    }
    if result.at(center, center) > SCALE {
        result.scale(1.0 / SCALE);
        exponent += SCALE_EXPONENT;
    }
    (result, exponent)
}

/// Limiting Kolmogorov distribution `K(x) = lim P(√n·D_n ≤ x)`.
fn kolmogorov_limit(x: f64) -> f64 {
    const TERMS: u32 = 100;
    const NEGLIGIBLE: f64 = 1e-17;

    if x <= 0.0 {
        return 0.0;
    }
    if x < 1.0 {
        // Jacobi theta form, fast for small x
        let c = -PI * PI / (8.0 * x * x);
        let mut sum = 0.0;
        for k in 1..=TERMS {
            let odd = f64::from(2 * k - 1);
            let term = (c * odd * odd).exp();
            sum += term;
            if term < NEGLIGIBLE {
                break;
            }
        }
        return (TAU.sqrt() / x * sum).clamp(0.0, 1.0);
    }
    let mut sum = 0.0;
    for k in 1..=TERMS {
        let kf = f64::from(k);
        let term = (-2.0 * kf * kf * x * x).exp();
        sum += if k % 2 == 1 { term } else { -term };
        if term < NEGLIGIBLE {
            break;
        }
    }
    (1.0 - 2.0 * sum).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_exact_reference_values() {
        // exact rational values of P(D_n < d)
        let ks = KolmogorovSmirnov::new(10).unwrap();
        assert_abs_diff_eq!(ks.cdf(0.3), 0.729_464_425_2, epsilon = 1e-12);
        assert_abs_diff_eq!(ks.cdf(0.2), 0.251_280_96, epsilon = 1e-12);
        assert_abs_diff_eq!(KolmogorovSmirnov::new(5).unwrap().cdf(0.5), 0.888, epsilon = 1e-12);
        assert_abs_diff_eq!(
            KolmogorovSmirnov::new(20).unwrap().cdf(0.25),
            0.862_374_301_632_823_8,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_closed_forms_near_bounds() {
        let ks = KolmogorovSmirnov::new(10).unwrap();
        assert_eq!(ks.cdf(0.0), 0.0);
        assert_eq!(ks.cdf(0.05), 0.0);
        assert_eq!(ks.cdf(1.0), 1.0);
        assert_abs_diff_eq!(ks.cdf(0.08), 2.194_196_594_688e-6, epsilon = 1e-15);
        assert_abs_diff_eq!(ks.cdf(0.95), 1.0 - 2.0 * 0.05_f64.powi(10), epsilon = 1e-15);
    }

    #[test]
    fn test_closed_forms_agree_with_matrix_method() {
        assert_abs_diff_eq!(marsaglia_tsang_wang(10, 0.08), 2.194_196_594_688e-6, epsilon = 1e-15);
        assert_abs_diff_eq!(
            marsaglia_tsang_wang(10, 0.95),
            1.0 - 2.0 * 0.05_f64.powi(10),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_quantiles_and_moments() {
        let ks = KolmogorovSmirnov::new(10).unwrap();
        assert_abs_diff_eq!(ks.quantile(0.5).unwrap(), 0.246_863_290_730_803_4, epsilon = 1e-9);
        assert_abs_diff_eq!(ks.quantile(0.99).unwrap(), 0.488_931_659_411_092_2, epsilon = 1e-9);
        assert_abs_diff_eq!(ks.mean().unwrap(), 0.259_193_114_904_990_8, epsilon = 1e-4);
        assert!(ks.std_dev().unwrap() > 0.0);
        assert!(ks.skewness().unwrap() > 0.0);
    }

    #[test]
    fn test_large_n_uses_limit() {
        let exact = KolmogorovSmirnov::new(EXACT_MAX_N).unwrap();
        let limit = KolmogorovSmirnov::new(EXACT_MAX_N + 1).unwrap();
        assert_abs_diff_eq!(exact.cdf(0.1), 0.886_463_427_099_093_1, epsilon = 1e-9);
        assert_abs_diff_eq!(limit.cdf(0.1), 0.887_944_369_428_996_6, epsilon = 1e-9);
    }

    #[test]
    fn test_limit_series_forms_meet() {
        let below = kolmogorov_limit(1.0 - 1e-12);
        let above = kolmogorov_limit(1.0);
        assert_abs_diff_eq!(below, above, epsilon = 1e-10);
        // K(1.3581) ~ 0.95
        assert_abs_diff_eq!(kolmogorov_limit(1.358_1), 0.95, epsilon = 1e-4);
    }

    #[test]
    fn test_pdf_is_non_negative_on_support() {
        let ks = KolmogorovSmirnov::new(7).unwrap();
        for i in 0..=100 {
            let d = f64::from(i) / 100.0;
            assert!(ks.pdf(d) >= 0.0);
        }
        assert_eq!(ks.pdf(-0.1), 0.0);
        assert_eq!(ks.pdf(1.1), 0.0);
    }

    #[test]
    fn test_rejects_empty_sample() {
        assert!(KolmogorovSmirnov::new(0).unwrap_err().is_invalid_parameters());
    }
}
