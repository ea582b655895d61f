use distviz_catalog::{ContinuousModel, EvaluationRange};
use serde::{Deserialize, Serialize};

use crate::value::{Value, checked_ratio};

/// PDF, CDF, reliability and hazard evaluated over an [`EvaluationRange`].
///
/// All four vectors have the range's length and are index-aligned with it:
///
/// - `reliability[i] = 1 − cdf[i]`
/// - `hazard[i] = pdf[i] / reliability[i]`, undefined where the reliability is
///   zero, either side is undefined, or the quotient is not finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedCurves {
    pub pdf: Vec<Value>,
    pub cdf: Vec<Value>,
    pub reliability: Vec<Value>,
    pub hazard: Vec<Value>,
}

impl DerivedCurves {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pdf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pdf.is_empty()
    }

    /// One row of every curve at index `i`, in `(pdf, cdf, reliability, hazard)` order.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<[Value; 4]> {
        Some([
            *self.pdf.get(i)?,
            *self.cdf.get(i)?,
            *self.reliability.get(i)?,
            *self.hazard.get(i)?,
        ])
    }
}

/// Evaluates the four curves of `model` at every point of `range`.
///
/// # Examples
///
/// ```
/// use distviz_catalog::{DistributionFamily, ParameterSet};
/// use distviz_stats::curves::curves;
///
/// let family = DistributionFamily::Exponential;
/// let (instance, range) = distviz_catalog::build(family, &ParameterSet::defaults(family)).unwrap();
/// let curves = curves(&instance, &range);
/// assert_eq!(curves.len(), range.len());
///
/// // the exponential hazard is constant
/// let hazard = curves.hazard[100].get().unwrap();
/// assert!((hazard - 1.0).abs() < 1e-9);
/// ```
pub fn curves<M>(model: &M, range: &EvaluationRange) -> DerivedCurves
where
    M: ContinuousModel + ?Sized,
{
    let xs = range.points();
    let mut pdf_raw = vec![0.0; xs.len()];
    let mut cdf_raw = vec![0.0; xs.len()];
    model.pdf_into(xs, &mut pdf_raw);
    model.cdf_into(xs, &mut cdf_raw);

    let pdf = pdf_raw.into_iter().map(Value::new).collect::<Vec<_>>();
    let cdf = cdf_raw.into_iter().map(Value::new).collect::<Vec<_>>();
    let reliability = cdf.iter().map(|c| c.map(|c| 1.0 - c)).collect::<Vec<_>>();
    let hazard = pdf
        .iter()
        .zip(&reliability)
        .map(|(&f, &r)| checked_ratio(f, r))
        .collect::<Vec<_>>();

    let undefined_hazard = hazard.iter().filter(|h| h.is_undefined()).count();
    tracing::debug!(points = xs.len(), undefined_hazard, "curves evaluated");

    DerivedCurves {
        pdf,
        cdf,
        reliability,
        hazard,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use distviz_catalog::{DistributionFamily, ParameterSet, build};

    use super::*;

    #[test]
    fn test_hazard_undefined_at_unit_support_end() {
        let family = DistributionFamily::Beta;
        let (instance, range) = build(family, &ParameterSet::defaults(family)).unwrap();
        let curves = curves(&instance, &range);
        let last = curves.len() - 1;
        assert_eq!(curves.reliability[last], Value::new(0.0));
        assert!(curves.hazard[last].is_undefined());
        assert!(curves.hazard[0].is_defined());
    }

    #[test]
    fn test_infinite_density_is_undefined() {
        let family = DistributionFamily::Power;
        let params = [("shape", 0.5)].into_iter().collect::<ParameterSet>();
        let (instance, range) = build(family, &params).unwrap();
        let curves = curves(&instance, &range);
        assert!(curves.pdf[0].is_undefined());
        assert!(curves.hazard[0].is_undefined());
        assert!(curves.pdf[1].is_defined());
    }

    #[test]
    fn test_rows_are_aligned() {
        let family = DistributionFamily::Weibull;
        let (instance, range) = build(family, &ParameterSet::defaults(family)).unwrap();
        let curves = curves(&instance, &range);
        let [pdf, cdf, reliability, hazard] = curves.row(250).unwrap();
        let x = range.points()[250];
        assert_eq!(pdf, Value::new(instance.pdf(x)));
        assert_eq!(cdf, Value::new(instance.cdf(x)));
        assert_abs_diff_eq!(
            reliability.get().unwrap() + cdf.get().unwrap(),
            1.0,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            hazard.get().unwrap(),
            pdf.get().unwrap() / reliability.get().unwrap()
        );
        assert!(curves.row(range.len()).is_none());
    }
}
