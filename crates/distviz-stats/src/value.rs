use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A numeric result that may be mathematically undefined.
///
/// A defined value is always finite: every constructor maps NaN and
/// infinities to [`Value::UNDEFINED`], so NaN/Inf never reach a caller.
///
/// Serializes as a JSON number, or as the string `"undefined"`.
///
/// # Examples
///
/// ```
/// use distviz_stats::value::Value;
///
/// assert_eq!(Value::new(1.5).get(), Some(1.5));
/// assert!(Value::new(f64::NAN).is_undefined());
/// assert_eq!(format!("{:.2}", Value::new(0.123_456)), "0.12");
/// assert_eq!(format!("{:.2}", Value::UNDEFINED), "undefined");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Value(Option<f64>);

impl Value {
    pub const UNDEFINED: Self = Self(None);

    /// Wraps `x`, mapping non-finite input to [`Self::UNDEFINED`].
    #[must_use]
    pub fn new(x: f64) -> Self {
        Self(x.is_finite().then_some(x))
    }

    /// Like [`Self::new`], with `None` also mapped to [`Self::UNDEFINED`].
    #[must_use]
    pub fn from_option(x: Option<f64>) -> Self {
        x.map_or(Self::UNDEFINED, Self::new)
    }

    #[must_use]
    pub fn get(self) -> Option<f64> {
        self.0
    }

    #[must_use]
    pub fn is_defined(self) -> bool {
        self.0.is_some()
    }

    #[must_use]
    pub fn is_undefined(self) -> bool {
        self.0.is_none()
    }

    /// Applies `f` to a defined value, re-normalizing the result.
    #[must_use]
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(f64) -> f64,
    {
        self.0.map_or(Self::UNDEFINED, |x| Self::new(f(x)))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::new(x)
    }
}

impl From<Option<f64>> for Value {
    fn from(x: Option<f64>) -> Self {
        Self::from_option(x)
    }
}

/// `numerator / denominator`, or [`Value::UNDEFINED`] when either side is
/// undefined, the denominator is zero, or the quotient is not finite.
///
/// ```
/// use distviz_stats::value::{Value, checked_ratio};
///
/// assert_eq!(checked_ratio(Value::new(1.0), Value::new(4.0)), Value::new(0.25));
/// assert!(checked_ratio(Value::new(1.0), Value::new(0.0)).is_undefined());
/// ```
#[must_use]
pub fn checked_ratio(numerator: Value, denominator: Value) -> Value {
    match (numerator.get(), denominator.get()) {
        (Some(n), Some(d)) if d != 0.0 => Value::new(n / d),
        _ => Value::UNDEFINED,
    }
}

const UNDEFINED_LABEL: &str = "undefined";

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(x) = self.0 else {
            // pad like a number, without applying the precision to the label
            return match (f.width(), f.align()) {
                (None, _) => f.write_str(UNDEFINED_LABEL),
                (Some(width), Some(fmt::Alignment::Left)) => write!(f, "{UNDEFINED_LABEL:<width$}"),
                (Some(width), Some(fmt::Alignment::Center)) => {
                    write!(f, "{UNDEFINED_LABEL:^width$}")
                }
                (Some(width), _) => write!(f, "{UNDEFINED_LABEL:>width$}"),
            };
        };
        fmt::Display::fmt(&x, f)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(x) => serializer.serialize_f64(x),
            None => serializer.serialize_str(UNDEFINED_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Label(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(x) => Ok(Self::new(x)),
            Repr::Label(label) if label == UNDEFINED_LABEL => Ok(Self::UNDEFINED),
            Repr::Label(label) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{UNDEFINED_LABEL}\", got \"{label}\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_is_undefined() {
        assert!(Value::new(f64::INFINITY).is_undefined());
        assert!(Value::new(f64::NEG_INFINITY).is_undefined());
        assert!(Value::from_option(None).is_undefined());
        assert_eq!(Value::from_option(Some(-0.5)), Value::new(-0.5));
    }

    #[test]
    fn test_map_renormalizes() {
        assert!(Value::new(0.0).map(f64::ln).is_undefined());
        assert_eq!(Value::new(4.0).map(f64::sqrt), Value::new(2.0));
        assert!(Value::UNDEFINED.map(|x| x + 1.0).is_undefined());
    }

    #[test]
    fn test_checked_ratio_overflow() {
        assert!(checked_ratio(Value::new(1e300), Value::new(1e-300)).is_undefined());
        assert!(checked_ratio(Value::UNDEFINED, Value::new(1.0)).is_undefined());
        assert!(checked_ratio(Value::new(1.0), Value::UNDEFINED).is_undefined());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::new(2.5).to_string(), "2.5");
        assert_eq!(format!("{:.3}", Value::new(2.0)), "2.000");
        assert_eq!(Value::UNDEFINED.to_string(), "undefined");
        assert_eq!(format!("{:>8.2}", Value::new(1.0)), "    1.00");
        assert_eq!(format!("{:>10.2}", Value::UNDEFINED), " undefined");
    }

    #[test]
    fn test_json_representation() {
        let json = serde_json::to_string(&[Value::new(1.5), Value::UNDEFINED]).unwrap();
        assert_eq!(json, r#"[1.5,"undefined"]"#);
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, [Value::new(1.5), Value::UNDEFINED]);
        assert!(serde_json::from_str::<Value>(r#""nan""#).is_err());
    }
}
