use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_distr::Exp;
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::likelihood::LikelihoodError;

/// Seed for reproducible exponential samples.
///
/// Two samples drawn with the same seed, rate and size are identical.
/// Serialized as a 32-character hexadecimal string.
///
/// # Examples
///
/// ```
/// use distviz_stats::sample::{ExponentialSample, SampleSeed};
///
/// let seed: SampleSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let a = ExponentialSample::with_seed(2.0, 10, seed).unwrap();
/// let b = ExponentialSample::with_seed(2.0, 10, seed).unwrap();
/// assert_eq!(a.values(), b.values());
/// assert_eq!(seed.to_string(), "000102030405060708090a0b0c0d0e0f");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleSeed([u8; 16]);

const SEED_HEX_LEN: usize = 32;

impl SampleSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SampleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Error returned when a seed is not 32 hexadecimal digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed '{input}': expected 32 hexadecimal characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for SampleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSeedError { input: s.to_owned() };
        if s.len() != SEED_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| invalid())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SampleSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SampleSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating fresh seeds with `rng.random()`.
impl Distribution<SampleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SampleSeed(seed)
    }
}

/// Largest sample a single draw may hold.
pub const MAX_SAMPLE_COUNT: usize = 100_000;

/// Independent draws from `Exp(rate)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialSample {
    rate: f64,
    seed: Option<SampleSeed>,
    values: Vec<f64>,
}

impl ExponentialSample {
    /// Draws `n` values from `Exp(rate)` using `rng`.
    ///
    /// Fails if `n` is zero or above [`MAX_SAMPLE_COUNT`], or if `rate` is not
    /// finite and positive.
    pub fn draw<R>(rate: f64, n: usize, rng: &mut R) -> Result<Self, LikelihoodError>
    where
        R: Rng + ?Sized,
    {
        if n == 0 || n > MAX_SAMPLE_COUNT {
            return Err(LikelihoodError::InvalidSampleCount);
        }
        if !(rate.is_finite() && rate > 0.0) {
            return Err(LikelihoodError::InvalidRate { rate });
        }
        let exp = Exp::new(rate).map_err(|_| LikelihoodError::InvalidRate { rate })?;
        let values = (0..n).map(|_| exp.sample(rng)).collect();
        Ok(Self {
            rate,
            seed: None,
            values,
        })
    }

    /// Like [`Self::draw`], with a PCG generator seeded from `seed`.
    pub fn with_seed(rate: f64, n: usize, seed: SampleSeed) -> Result<Self, LikelihoodError> {
        let mut rng = Pcg32::from_seed(seed.0);
        let mut sample = Self::draw(rate, n, &mut rng)?;
        sample.seed = Some(seed);
        tracing::debug!(rate, n, %seed, sum = sample.sum(), "exponential sample drawn");
        Ok(sample)
    }

    /// Like [`Self::with_seed`], with a fresh random seed.
    pub fn random(rate: f64, n: usize) -> Result<Self, LikelihoodError> {
        Self::with_seed(rate, n, rand::rng().random())
    }

    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The seed the sample was drawn with, if it was drawn through [`Self::with_seed`].
    #[must_use]
    pub fn seed(&self) -> Option<SampleSeed> {
        self.seed
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    const SEED: SampleSeed = SampleSeed::from_bytes([7; 16]);

    #[test]
    fn test_seed_hex_round_trip() {
        let json = serde_json::to_string(&SEED).unwrap();
        assert_eq!(json, "\"07070707070707070707070707070707\"");
        let back: SampleSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SEED);
    }

    #[test]
    fn test_seed_rejects_bad_input() {
        assert!("abc".parse::<SampleSeed>().is_err());
        assert!("zz070707070707070707070707070707".parse::<SampleSeed>().is_err());
        assert!(serde_json::from_str::<SampleSeed>("\"1234\"").is_err());
    }

    #[test]
    fn test_draw_validates_input() {
        assert_eq!(
            ExponentialSample::with_seed(1.0, 0, SEED),
            Err(LikelihoodError::InvalidSampleCount)
        );
        assert!(
            ExponentialSample::with_seed(0.0, 10, SEED)
                .unwrap_err()
                .is_invalid_rate()
        );
        assert!(
            ExponentialSample::with_seed(f64::INFINITY, 10, SEED)
                .unwrap_err()
                .is_invalid_rate()
        );
    }

    #[test]
    fn test_draw_caps_sample_count() {
        assert!(ExponentialSample::with_seed(1.0, MAX_SAMPLE_COUNT, SEED).is_ok());
        assert_eq!(
            ExponentialSample::with_seed(1.0, MAX_SAMPLE_COUNT + 1, SEED),
            Err(LikelihoodError::InvalidSampleCount)
        );
        assert_eq!(
            ExponentialSample::with_seed(1.0, usize::MAX, SEED),
            Err(LikelihoodError::InvalidSampleCount)
        );
        let message = LikelihoodError::InvalidSampleCount.to_string();
        assert!(message.contains(&MAX_SAMPLE_COUNT.to_string()), "{message}");
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let a = ExponentialSample::with_seed(2.0, 100, SEED).unwrap();
        let b = ExponentialSample::with_seed(2.0, 100, SEED).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 100);
        assert_eq!(a.seed(), Some(SEED));
        assert!(a.values().iter().all(|&x| x >= 0.0 && x.is_finite()));

        let other = ExponentialSample::with_seed(2.0, 100, SampleSeed::from_bytes([8; 16])).unwrap();
        assert_ne!(a.values(), other.values());
    }

    #[test]
    fn test_draw_with_any_rng() {
        let mut rng = Pcg32::seed_from_u64(42);
        let sample = ExponentialSample::draw(0.5, 20, &mut rng).unwrap();
        assert_eq!(sample.len(), 20);
        assert_eq!(sample.seed(), None);
    }

    #[test]
    fn test_sample_mean_tracks_rate() {
        let sample = ExponentialSample::with_seed(4.0, 10_000, SEED).unwrap();
        let mean = sample.sum() / 10_000.0;
        assert!((mean - 0.25).abs() < 0.02, "mean = {mean}");
    }
}
