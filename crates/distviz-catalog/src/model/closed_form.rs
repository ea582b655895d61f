use std::f64::consts::PI;

use super::{ContinuousModel, check};
use crate::{CatalogError, DistributionFamily, numeric::Support, range::RangeRule};

/// Log-logistic (Fisk) distribution with shape `c` and unit scale.
///
/// `F(x) = 1 / (1 + x^-c)` for `x > 0`. The `r`-th raw moment exists for
/// `r < c` and equals `(rπ/c) / sin(rπ/c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLogistic {
    shape: f64,
}

impl LogLogistic {
    pub fn new(shape: f64) -> Result<Self, CatalogError> {
        check(
            DistributionFamily::LogLogistic,
            shape.is_finite() && shape > 0.0,
            || format!("shape must be > 0, got {shape}"),
        )?;
        Ok(Self { shape })
    }

    /// `E[X^r]`, defined for `r < c`.
    fn raw_moment(&self, r: f64) -> Option<f64> {
        (r < self.shape).then(|| {
            let b = r * PI / self.shape;
            b / b.sin()
        })
    }

    fn variance(&self) -> Option<f64> {
        let m1 = self.raw_moment(1.0)?;
        let m2 = self.raw_moment(2.0)?;
        Some(m2 - m1 * m1)
    }
}

impl ContinuousModel for LogLogistic {
    fn pdf(&self, x: f64) -> f64 {
        let c = self.shape;
        if x < 0.0 {
            0.0
        } else if x <= 1.0 {
            let u = x.powf(c);
            c * x.powf(c - 1.0) / (1.0 + u).powi(2)
        } else {
            // x^-c form avoids overflow of x^c in the tail
            let v = x.powf(-c);
            c * x.powf(-c - 1.0) / (1.0 + v).powi(2)
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            1.0 / (1.0 + x.powf(-self.shape))
        }
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        (0.0..1.0)
            .contains(&p)
            .then(|| (p / (1.0 - p)).powf(self.shape.recip()))
    }

    fn mean(&self) -> Option<f64> {
        self.raw_moment(1.0)
    }

    fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    fn skewness(&self) -> Option<f64> {
        let m1 = self.raw_moment(1.0)?;
        let m2 = self.raw_moment(2.0)?;
        let m3 = self.raw_moment(3.0)?;
        let variance = m2 - m1 * m1;
        Some((m3 - 3.0 * m1 * m2 + 2.0 * m1.powi(3)) / variance.powf(1.5))
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::ZeroToUpperQuantile
    }
}

/// Power-function distribution with shape `a` on `[0, 1]`: `f(x) = a·x^(a−1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Power {
    shape: f64,
}

impl Power {
    pub fn new(shape: f64) -> Result<Self, CatalogError> {
        check(
            DistributionFamily::Power,
            shape.is_finite() && shape > 0.0,
            || format!("shape must be > 0, got {shape}"),
        )?;
        Ok(Self { shape })
    }
}

impl ContinuousModel for Power {
    fn pdf(&self, x: f64) -> f64 {
        if (0.0..=1.0).contains(&x) {
            self.shape * x.powf(self.shape - 1.0)
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        x.clamp(0.0, 1.0).powf(self.shape)
    }

    fn support(&self) -> Support {
        Support::UNIT
    }

    fn quantile(&self, p: f64) -> Option<f64> {
        (0.0..=1.0)
            .contains(&p)
            .then(|| p.powf(self.shape.recip()))
    }

    fn mean(&self) -> Option<f64> {
        let a = self.shape;
        Some(a / (a + 1.0))
    }

    fn std_dev(&self) -> Option<f64> {
        let a = self.shape;
        Some((a / ((a + 1.0).powi(2) * (a + 2.0))).sqrt())
    }

    fn skewness(&self) -> Option<f64> {
        let a = self.shape;
        Some(2.0 * (1.0 - a) * (a + 2.0).sqrt() / ((a + 3.0) * a.sqrt()))
    }

    fn range_rule(&self) -> RangeRule {
        RangeRule::Fixed {
            start: 0.0,
            end: 1.0,
        }
    }
}
