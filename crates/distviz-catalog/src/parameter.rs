use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, DistributionFamily};

/// Maximum number of parameters of any family.
pub const MAX_ARITY: usize = 2;

/// Domain constraint of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParamDomain {
    /// Any finite value (locations).
    Real,
    /// Finite and strictly positive (shapes, scales, degrees of freedom).
    Positive,
    /// Strictly positive, rounded to the nearest integer and raised to at least 1.
    PositiveInteger,
    /// Strictly positive, clamped into `[min, max]`.
    Clamped { min: f64, max: f64 },
    /// Within `[min, max]`; values outside are rejected.
    Bounded { min: f64, max: f64 },
}

impl ParamDomain {
    /// Normalizes `value` into this domain, or returns a description of the violation.
    ///
    /// ```
    /// use distviz_catalog::ParamDomain;
    ///
    /// assert_eq!(ParamDomain::PositiveInteger.normalize(2.6), Ok(3.0));
    /// assert_eq!(ParamDomain::PositiveInteger.normalize(0.25), Ok(1.0));
    /// assert_eq!(ParamDomain::Clamped { min: 0.1, max: 5.0 }.normalize(50.0), Ok(5.0));
    /// assert!(ParamDomain::Positive.normalize(0.0).is_err());
    /// assert!(ParamDomain::Bounded { min: 0.0, max: 1.0 }.normalize(2.0).is_err());
    /// ```
    pub fn normalize(self, value: f64) -> Result<f64, String> {
        if !value.is_finite() {
            return Err(format!("must be finite, got {value}"));
        }
        match self {
            Self::Real => Ok(value),
            Self::Positive => {
                if value > 0.0 {
                    Ok(value)
                } else {
                    Err(format!("must be > 0, got {value}"))
                }
            }
            Self::PositiveInteger => {
                if value > 0.0 {
                    Ok(value.round().max(1.0))
                } else {
                    Err(format!("must be a positive integer, got {value}"))
                }
            }
            Self::Clamped { min, max } => {
                if value > 0.0 {
                    Ok(value.clamp(min, max))
                } else {
                    Err(format!("must be > 0, got {value}"))
                }
            }
            Self::Bounded { min, max } => {
                if (min..=max).contains(&value) {
                    Ok(value)
                } else {
                    Err(format!("must be in [{min}, {max}], got {value}"))
                }
            }
        }
    }

    /// Whether negative values belong to the domain.
    #[must_use]
    pub fn admits_negative(self) -> bool {
        match self {
            Self::Real => true,
            Self::Bounded { min, .. } => min < 0.0,
            Self::Positive | Self::PositiveInteger | Self::Clamped { .. } => false,
        }
    }
}

/// Schema entry describing one parameter of a family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// Key used in a [`ParameterSet`].
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub domain: ParamDomain,
    pub default: f64,
}

impl ParameterSpec {
    #[must_use]
    pub const fn new(
        name: &'static str,
        label: &'static str,
        domain: ParamDomain,
        default: f64,
    ) -> Self {
        Self {
            name,
            label,
            domain,
            default,
        }
    }
}

/// Caller-supplied mapping from parameter name to value.
///
/// # Example
///
/// ```
/// use distviz_catalog::{DistributionFamily, ParameterSet};
///
/// let params = ParameterSet::defaults(DistributionFamily::Beta);
/// assert_eq!(params.get("alpha"), Some(2.0));
/// assert_eq!(params.get("beta"), Some(5.0));
///
/// let params = ParameterSet::from_iter([("mean", 1.0), ("std_dev", 0.5)]);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, f64>);

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema defaults of `family`.
    #[must_use]
    pub fn defaults(family: DistributionFamily) -> Self {
        family
            .schema()
            .iter()
            .map(|spec| (spec.name, spec.default))
            .collect()
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(name.into(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Fills every schema parameter of `family` missing from this set with its default.
    pub fn fill_defaults(&mut self, family: DistributionFamily) {
        for spec in family.schema() {
            self.0.entry(spec.name.to_owned()).or_insert(spec.default);
        }
    }
}

impl<K> FromIterator<(K, f64)> for ParameterSet
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A parameter value after validation, rounding and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedParameter {
    pub name: &'static str,
    pub value: f64,
}

/// The validated parameters of one family, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParameters {
    family: DistributionFamily,
    values: ArrayVec<ResolvedParameter, MAX_ARITY>,
}

impl ResolvedParameters {
    /// Validates `params` against the schema of `family`.
    ///
    /// Every schema parameter must be present, unknown names are rejected, and
    /// each value is normalized by its [`ParamDomain`].
    pub fn resolve(family: DistributionFamily, params: &ParameterSet) -> Result<Self, CatalogError> {
        let schema = family.schema();
        if let Some((name, _)) = params.iter().find(|(name, _)| family.parameter(name).is_none()) {
            return Err(CatalogError::invalid(
                family,
                format!("unexpected parameter '{name}'"),
            ));
        }

        let mut values = ArrayVec::new();
        for spec in schema {
            let raw = params.get(spec.name).ok_or_else(|| {
                CatalogError::invalid(family, format!("missing parameter '{}'", spec.name))
            })?;
            let value = spec
                .domain
                .normalize(raw)
                .map_err(|reason| CatalogError::invalid(family, format!("{} {reason}", spec.name)))?;
            if value.to_bits() != raw.to_bits() {
                tracing::debug!(%family, parameter = spec.name, raw, value, "parameter normalized");
            }
            values.push(ResolvedParameter {
                name: spec.name,
                value,
            });
        }
        Ok(Self { family, values })
    }

    #[must_use]
    pub fn family(&self) -> DistributionFamily {
        self.family
    }

    /// Value of the `index`-th schema parameter.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the family's arity.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        self.values[index].value
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|p| p.name == name).map(|p| p.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedParameter> + '_ {
        self.values.iter()
    }

    /// Converts back into a caller-side [`ParameterSet`].
    #[must_use]
    pub fn to_parameter_set(&self) -> ParameterSet {
        self.values.iter().map(|p| (p.name, p.value)).collect()
    }
}
