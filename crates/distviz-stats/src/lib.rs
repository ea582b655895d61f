//! Derived quantities for the distviz explorer.
//!
//! Given a distribution built by `distviz_catalog`, this crate computes
//! everything the explorer displays about it:
//!
//! - **Summary statistics**: mean, standard deviation and skewness, each of
//!   which may be undefined
//! - **Curves**: PDF, CDF, reliability and hazard over the evaluation range
//! - **Reference markers**: PDF heights at the mean and mean ± 1 SD
//! - **Likelihood**: log-likelihood surface and MLE of the exponential rate
//!   for a seeded sample
//!
//! Undefined results never surface as NaN or infinity; they are represented by
//! [`value::Value::UNDEFINED`].
//!
//! # Modules
//!
//! - [`value`]: the finite-or-undefined sentinel and checked division
//! - [`summary`]: summary statistics of a distribution
//! - [`curves`]: the four derived curves
//! - [`markers`]: mean and ± 1 SD markers
//! - [`likelihood`]: log-likelihood surface and MLE
//! - [`sample`]: seeded exponential draws
//! - [`descriptive`]: descriptive statistics of an observed sample
//! - [`evaluation`]: one request evaluated end to end
//!
//! # Examples
//!
//! ```
//! use distviz_catalog::{DistributionFamily, ParameterSet};
//! use distviz_stats::{curves::curves, summary::summary_statistics, value::Value};
//!
//! let family = DistributionFamily::Normal;
//! let (instance, range) = distviz_catalog::build(family, &ParameterSet::defaults(family)).unwrap();
//!
//! let summary = summary_statistics(&instance);
//! assert_eq!(summary.std_dev, Value::new(1.0));
//!
//! let curves = curves(&instance, &range);
//! for (c, r) in curves.cdf.iter().zip(&curves.reliability) {
//!     let sum = c.get().unwrap() + r.get().unwrap();
//!     assert!((sum - 1.0).abs() < 1e-12);
//! }
//! ```

pub mod curves;
pub mod descriptive;
pub mod evaluation;
pub mod likelihood;
pub mod markers;
pub mod sample;
pub mod summary;
pub mod value;
