use distviz_catalog::EvaluationRange;
use serde::{Deserialize, Serialize};

use crate::{summary::SummaryStatistics, value::Value};

/// A vertical reference line drawn on the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f64,
    /// PDF height at `x`, interpolated from the evaluated curve.
    pub height: Value,
}

/// Markers at the mean and one standard deviation either side of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMarkers {
    pub mean: Marker,
    pub lower: Marker,
    pub upper: Marker,
}

/// Places the mean and mean ± 1 SD markers on an evaluated PDF.
///
/// Returns `None` when the mean or the standard deviation is undefined, or
/// when `range` is empty.
///
/// # Panics
///
/// Panics if `pdf` and `range` differ in length.
#[must_use]
pub fn reference_markers(
    summary: &SummaryStatistics,
    range: &EvaluationRange,
    pdf: &[Value],
) -> Option<ReferenceMarkers> {
    assert_eq!(range.len(), pdf.len(), "pdf must be aligned with the range");
    let mean = summary.mean.get()?;
    let std_dev = summary.std_dev.get()?;
    let marker = |x: f64| {
        interpolate(range.points(), pdf, x).map(|height| Marker { x, height })
    };
    Some(ReferenceMarkers {
        mean: marker(mean)?,
        lower: marker(mean - std_dev)?,
        upper: marker(mean + std_dev)?,
    })
}

/// Piecewise-linear interpolation of `(xs, ys)` at `x`.
///
/// Outside `[xs[0], xs[last]]` the nearest endpoint value is returned. The
/// result is undefined if either bracketing value is. `None` for empty input.
fn interpolate(xs: &[f64], ys: &[Value], x: f64) -> Option<Value> {
    let (&first, &last) = (xs.first()?, xs.last()?);
    if x <= first {
        return ys.first().copied();
    }
    if x >= last {
        return ys.last().copied();
    }
    // xs[i - 1] <= x < xs[i]
    let i = xs.partition_point(|&p| p <= x);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1].get(), ys[i].get());
    let value = match (y0, y1) {
        (Some(y0), Some(y1)) => Value::new(y0 + (y1 - y0) * (x - x0) / (x1 - x0)),
        _ => Value::UNDEFINED,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn summary(mean: f64, std_dev: f64) -> SummaryStatistics {
        SummaryStatistics {
            mean: Value::new(mean),
            std_dev: Value::new(std_dev),
            skewness: Value::new(0.0),
        }
    }

    #[test]
    fn test_interpolate_between_points() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [Value::new(0.0), Value::new(10.0), Value::new(0.0)];
        assert_abs_diff_eq!(interpolate(&xs, &ys, 0.25).unwrap().get().unwrap(), 2.5);
        assert_abs_diff_eq!(interpolate(&xs, &ys, 1.0).unwrap().get().unwrap(), 10.0);
        assert_abs_diff_eq!(interpolate(&xs, &ys, 1.5).unwrap().get().unwrap(), 5.0);
    }

    #[test]
    fn test_interpolate_clamps_outside() {
        let xs = [0.0, 1.0];
        let ys = [Value::new(3.0), Value::new(4.0)];
        assert_eq!(interpolate(&xs, &ys, -5.0), Some(Value::new(3.0)));
        assert_eq!(interpolate(&xs, &ys, 5.0), Some(Value::new(4.0)));
        assert_eq!(interpolate(&[], &[], 0.0), None);
    }

    #[test]
    fn test_interpolate_undefined_neighbour() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [Value::UNDEFINED, Value::new(1.0), Value::new(2.0)];
        assert!(interpolate(&xs, &ys, 0.5).unwrap().is_undefined());
        assert_eq!(interpolate(&xs, &ys, 1.5), Some(Value::new(1.5)));
    }

    #[test]
    fn test_markers_on_linear_pdf() {
        let range = EvaluationRange::linspace(0.0, 4.0, 5);
        let pdf = range.points().iter().map(|&x| Value::new(x)).collect::<Vec<_>>();
        let markers = reference_markers(&summary(2.0, 0.5), &range, &pdf).unwrap();
        assert_eq!(markers.mean.height, Value::new(2.0));
        assert_eq!(markers.lower.x, 1.5);
        assert_eq!(markers.lower.height, Value::new(1.5));
        assert_eq!(markers.upper.height, Value::new(2.5));
    }

    #[test]
    fn test_no_markers_without_moments() {
        let range = EvaluationRange::linspace(0.0, 1.0, 3);
        let pdf = vec![Value::new(1.0); 3];
        let mut stats = summary(0.5, 0.1);
        stats.std_dev = Value::UNDEFINED;
        assert!(reference_markers(&stats, &range, &pdf).is_none());
    }
}
