use serde::Serialize;

/// Number of points in every [`EvaluationRange`].
pub const EVALUATION_POINTS: usize = 500;

/// Lower probability used by quantile-based range rules.
pub const LOWER_PROBABILITY: f64 = 0.01;
/// Upper probability used by quantile-based range rules.
pub const UPPER_PROBABILITY: f64 = 0.99;

/// How a family chooses the x-range it is plotted over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeRule {
    /// Fixed bounds known in closed form (`[μ − 4σ, μ + 4σ]`, `[0, 1]`).
    Fixed { start: f64, end: f64 },
    /// `[0, Q(0.99)]`.
    ZeroToUpperQuantile,
    /// `[Q(0.01), Q(0.99)]`.
    CentralQuantiles,
}

/// Evenly spaced evaluation points covering a family's domain of interest.
///
/// The first point is exactly `start` and the last exactly `end`.
///
/// # Example
///
/// ```
/// use distviz_catalog::EvaluationRange;
///
/// let range = EvaluationRange::linspace(-4.0, 4.0, 5);
/// assert_eq!(range.points(), &[-4.0, -2.0, 0.0, 2.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EvaluationRange {
    points: Vec<f64>,
}

impl EvaluationRange {
    /// `count` evenly spaced points over `[start, end]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn linspace(start: f64, end: f64, count: usize) -> Self {
        let points = match count {
            0 => vec![],
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                let mut points = (0..count)
                    .map(|i| start + step * i as f64)
                    .collect::<Vec<_>>();
                points[count - 1] = end;
                points
            }
        };
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point, or `None` for an empty range.
    #[must_use]
    pub fn start(&self) -> Option<f64> {
        self.points.first().copied()
    }

    /// Last point, or `None` for an empty range.
    #[must_use]
    pub fn end(&self) -> Option<f64> {
        self.points.last().copied()
    }

    #[must_use]
    pub fn into_points(self) -> Vec<f64> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints_exact() {
        let range = EvaluationRange::linspace(0.0, 0.1, EVALUATION_POINTS);
        assert_eq!(range.len(), EVALUATION_POINTS);
        assert_eq!(range.start(), Some(0.0));
        assert_eq!(range.end(), Some(0.1));
    }

    #[test]
    fn test_linspace_is_increasing() {
        let range = EvaluationRange::linspace(-3.3, 7.1, EVALUATION_POINTS);
        assert!(range.points().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(EvaluationRange::linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(EvaluationRange::linspace(2.0, 3.0, 1).points(), &[2.0]);
    }
}
