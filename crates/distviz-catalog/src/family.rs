use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    CatalogError,
    model::{MAX_CHI_SQUARE_NONCENTRALITY, MAX_T_NONCENTRALITY},
    parameter::{ParamDomain, ParameterSpec},
};

/// The closed set of distribution families known to the catalog.
///
/// Exactly one family is active per evaluation. Identifiers are parsed
/// leniently (see [`DistributionFamily::from_str`]) and displayed with their
/// human-readable label.
///
/// # Example
///
/// ```
/// use distviz_catalog::DistributionFamily;
///
/// let family: DistributionFamily = "Chi-Square".parse().unwrap();
/// assert_eq!(family, DistributionFamily::ChiSquare);
/// assert_eq!(family.to_string(), "Chi-Square");
/// assert_eq!(family.id(), "chi-square");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DistributionFamily {
    #[display("Normal")]
    Normal,
    #[display("Gamma")]
    Gamma,
    #[display("Beta")]
    Beta,
    #[display("Exponential")]
    Exponential,
    #[display("Weibull")]
    Weibull,
    #[display("Cauchy")]
    Cauchy,
    #[display("Chi-Square")]
    ChiSquare,
    #[display("Log-Normal")]
    LogNormal,
    #[display("Erlang")]
    Erlang,
    #[display("Pareto")]
    Pareto,
    #[display("Log-Logistic")]
    LogLogistic,
    #[display("Noncentral Chi-Square")]
    NoncentralChiSquare,
    #[display("Noncentral t")]
    NoncentralT,
    #[display("Kolmogorov-Smirnov")]
    KolmogorovSmirnov,
    #[display("Power")]
    Power,
}

const fn positive(name: &'static str, label: &'static str, default: f64) -> ParameterSpec {
    ParameterSpec::new(name, label, ParamDomain::Positive, default)
}

const fn real(name: &'static str, label: &'static str, default: f64) -> ParameterSpec {
    ParameterSpec::new(name, label, ParamDomain::Real, default)
}

const fn integer(name: &'static str, label: &'static str, default: f64) -> ParameterSpec {
    ParameterSpec::new(name, label, ParamDomain::PositiveInteger, default)
}

const NORMAL: [ParameterSpec; 2] = [
    real("mean", "Mean (μ)", 0.0),
    positive("std_dev", "Standard Deviation (σ)", 1.0),
];
const GAMMA: [ParameterSpec; 2] = [
    positive("shape", "Shape (k)", 2.0),
    positive("scale", "Scale (θ)", 2.0),
];
const BETA: [ParameterSpec; 2] = [
    positive("alpha", "Alpha (α)", 2.0),
    positive("beta", "Beta (β)", 5.0),
];
const EXPONENTIAL: [ParameterSpec; 1] = [positive("scale", "Scale (λ)", 1.0)];
const WEIBULL: [ParameterSpec; 2] = [
    ParameterSpec::new(
        "shape",
        "Shape (c)",
        ParamDomain::Clamped { min: 0.1, max: 5.0 },
        1.5,
    ),
    ParameterSpec::new(
        "scale",
        "Scale (λ)",
        ParamDomain::Clamped {
            min: 0.1,
            max: 10.0,
        },
        1.0,
    ),
];
const CAUCHY: [ParameterSpec; 2] = [
    real("location", "Location (x₀)", 0.0),
    positive("scale", "Scale (γ)", 1.0),
];
const CHI_SQUARE: [ParameterSpec; 1] = [positive("df", "Degrees of Freedom (k)", 2.0)];
const LOG_NORMAL: [ParameterSpec; 2] = [
    real("mu", "Mean of log (μ)", 0.0),
    positive("sigma", "Standard Deviation of log (σ)", 1.0),
];
const ERLANG: [ParameterSpec; 2] = [
    integer("shape", "Shape (k)", 2.0),
    positive("scale", "Scale (θ)", 1.0),
];
const PARETO: [ParameterSpec; 1] = [positive("shape", "Shape (b)", 2.0)];
const LOG_LOGISTIC: [ParameterSpec; 1] = [positive("shape", "Shape (c)", 2.0)];
const NONCENTRAL_CHI_SQUARE: [ParameterSpec; 2] = [
    integer("df", "Degrees of Freedom (k)", 2.0),
    ParameterSpec::new(
        "noncentrality",
        "Noncentrality (λ)",
        ParamDomain::Bounded {
            min: 0.0,
            max: MAX_CHI_SQUARE_NONCENTRALITY,
        },
        1.0,
    ),
];
const NONCENTRAL_T: [ParameterSpec; 2] = [
    positive("df", "Degrees of Freedom (k)", 10.0),
    ParameterSpec::new(
        "noncentrality",
        "Noncentrality (δ)",
        ParamDomain::Bounded {
            min: -MAX_T_NONCENTRALITY,
            max: MAX_T_NONCENTRALITY,
        },
        1.0,
    ),
];
const KOLMOGOROV_SMIRNOV: [ParameterSpec; 1] = [integer("n", "Sample Size (n)", 10.0)];
const POWER: [ParameterSpec; 1] = [positive("shape", "Shape (a)", 2.0)];

impl DistributionFamily {
    /// Every family, in menu order.
    pub const ALL: [Self; 15] = [
        Self::Normal,
        Self::Gamma,
        Self::Beta,
        Self::Exponential,
        Self::Weibull,
        Self::Cauchy,
        Self::ChiSquare,
        Self::LogNormal,
        Self::Erlang,
        Self::Pareto,
        Self::LogLogistic,
        Self::NoncentralChiSquare,
        Self::NoncentralT,
        Self::KolmogorovSmirnov,
        Self::Power,
    ];

    /// Stable machine identifier, used for serialization.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Gamma => "gamma",
            Self::Beta => "beta",
            Self::Exponential => "exponential",
            Self::Weibull => "weibull",
            Self::Cauchy => "cauchy",
            Self::ChiSquare => "chi-square",
            Self::LogNormal => "log-normal",
            Self::Erlang => "erlang",
            Self::Pareto => "pareto",
            Self::LogLogistic => "log-logistic",
            Self::NoncentralChiSquare => "noncentral-chi-square",
            Self::NoncentralT => "noncentral-t",
            Self::KolmogorovSmirnov => "kolmogorov-smirnov",
            Self::Power => "power",
        }
    }

    /// Parameter schema of this family, in positional order.
    #[must_use]
    pub const fn schema(self) -> &'static [ParameterSpec] {
        match self {
            Self::Normal => &NORMAL,
            Self::Gamma => &GAMMA,
            Self::Beta => &BETA,
            Self::Exponential => &EXPONENTIAL,
            Self::Weibull => &WEIBULL,
            Self::Cauchy => &CAUCHY,
            Self::ChiSquare => &CHI_SQUARE,
            Self::LogNormal => &LOG_NORMAL,
            Self::Erlang => &ERLANG,
            Self::Pareto => &PARETO,
            Self::LogLogistic => &LOG_LOGISTIC,
            Self::NoncentralChiSquare => &NONCENTRAL_CHI_SQUARE,
            Self::NoncentralT => &NONCENTRAL_T,
            Self::KolmogorovSmirnov => &KOLMOGOROV_SMIRNOV,
            Self::Power => &POWER,
        }
    }

    /// Looks up a parameter of this family by name.
    #[must_use]
    pub fn parameter(self, name: &str) -> Option<&'static ParameterSpec> {
        self.schema().iter().find(|spec| spec.name == name)
    }
}

/// Folds an identifier to lowercase alphanumerics so that `"Chi-Square"`,
/// `"chi_square"` and `"chisquare"` compare equal.
fn fold_identifier(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for DistributionFamily {
    type Err = CatalogError;

    /// Parses a family identifier.
    ///
    /// Matching ignores case, whitespace, `-` and `_`. Besides the display
    /// labels and ids, the scipy names (`norm`, `expon`, `chi2`, `lognorm`,
    /// `fisk`, `ncx2`, `nct`, `kstwo`, `powerlaw`, `weibull_min`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let family = match fold_identifier(s).as_str() {
            "normal" | "norm" | "gaussian" => Self::Normal,
            "gamma" => Self::Gamma,
            "beta" => Self::Beta,
            "exponential" | "expon" | "exp" => Self::Exponential,
            "weibull" | "weibullmin" => Self::Weibull,
            "cauchy" => Self::Cauchy,
            "chisquare" | "chisquared" | "chi2" => Self::ChiSquare,
            "lognormal" | "lognorm" => Self::LogNormal,
            "erlang" => Self::Erlang,
            "pareto" => Self::Pareto,
            "loglogistic" | "fisk" => Self::LogLogistic,
            "noncentralchisquare" | "noncentralchisquared" | "ncx2" => Self::NoncentralChiSquare,
            "noncentralt" | "nct" => Self::NoncentralT,
            "kolmogorovsmirnov" | "kstwo" | "ks" => Self::KolmogorovSmirnov,
            "power" | "powerlaw" => Self::Power,
            _ => {
                return Err(CatalogError::UnknownFamily {
                    name: s.to_owned(),
                });
            }
        };
        Ok(family)
    }
}

impl Serialize for DistributionFamily {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for DistributionFamily {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
