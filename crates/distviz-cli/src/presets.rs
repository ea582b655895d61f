//! Slider tick marks offered by the explorer's parameter inputs.
//!
//! With `--input-method sliders` every value is snapped to the nearest tick
//! before it reaches the catalog.

use distviz_catalog::{DistributionFamily, ParameterSet, ParameterSpec};
use serde::Serialize;

/// Ticks for location-like parameters.
pub const REAL_TICKS: &[f64] = &[
    -100.0, -50.0, -10.0, -5.0, -3.0, -2.0, -1.0, -0.5, -0.25, 0.0, 0.25, 0.5, 1.0, 2.0, 3.0, 5.0,
    10.0, 50.0, 100.0,
];

/// Ticks for every other parameter.
pub const POSITIVE_TICKS: &[f64] = &[0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 10.0, 50.0, 100.0];

/// Likelihood rate slider: 0.1 to 10 in steps of 0.1.
pub const RATE_TICKS: TickSet = TickSet::stepped(1, 100, 1, 10);
/// Likelihood sample-size slider: 10 to 1000 in steps of 10.
pub const SAMPLE_COUNT_TICKS: TickSet = TickSet::stepped(1, 100, 10, 1);

const WEIBULL_SHAPE_TICKS: TickSet = TickSet::stepped(1, 50, 1, 10);
const WEIBULL_SCALE_TICKS: TickSet = TickSet::stepped(1, 100, 1, 10);

/// The discrete values a slider can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickSet {
    /// An explicit ascending list.
    Listed(&'static [f64]),
    /// `k · numerator / denominator` for `k` in `first..=last`.
    Stepped {
        first: u32,
        last: u32,
        numerator: u32,
        denominator: u32,
    },
}

impl TickSet {
    const fn stepped(first: u32, last: u32, numerator: u32, denominator: u32) -> Self {
        Self::Stepped {
            first,
            last,
            numerator,
            denominator,
        }
    }

    /// Tick set of `spec`, a parameter of `family`.
    #[must_use]
    pub fn for_parameter(family: DistributionFamily, spec: &ParameterSpec) -> Self {
        match (family, spec.name) {
            (DistributionFamily::Weibull, "shape") => WEIBULL_SHAPE_TICKS,
            (DistributionFamily::Weibull, "scale") => WEIBULL_SCALE_TICKS,
            _ if spec.domain.admits_negative() => Self::Listed(REAL_TICKS),
            _ => Self::Listed(POSITIVE_TICKS),
        }
    }

    fn tick(numerator: u32, denominator: u32, k: u32) -> f64 {
        f64::from(k * numerator) / f64::from(denominator)
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        match *self {
            Self::Listed(values) => values.to_vec(),
            Self::Stepped {
                first,
                last,
                numerator,
                denominator,
            } => (first..=last)
                .map(|k| Self::tick(numerator, denominator, k))
                .collect(),
        }
    }

    /// The tick nearest to `value`; the lower tick wins a tie.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        match *self {
            Self::Listed(values) => values
                .iter()
                .copied()
                .reduce(|best, t| {
                    if (t - value).abs() < (best - value).abs() {
                        t
                    } else {
                        best
                    }
                })
                .unwrap_or(value),
            Self::Stepped {
                first,
                last,
                numerator,
                denominator,
            } => {
                let k = (value * f64::from(denominator) / f64::from(numerator))
                    .round()
                    .clamp(f64::from(first), f64::from(last)) as u32;
                Self::tick(numerator, denominator, k)
            }
        }
    }
}

impl Serialize for TickSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.values())
    }
}

/// Snaps every parameter of `params` that belongs to `family`'s schema.
pub fn snap_parameters(family: DistributionFamily, params: &mut ParameterSet) {
    for spec in family.schema() {
        if let Some(value) = params.get(spec.name) {
            let snapped = TickSet::for_parameter(family, spec).snap(value);
            if snapped.to_bits() != value.to_bits() {
                tracing::debug!(%family, parameter = spec.name, value, snapped, "snapped to tick");
            }
            params.insert(spec.name, snapped);
        }
    }
}
