use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::loading_error::LoadingError;

/// Milli-units per unit.
pub const SCALE: u64 = 1000;

// Anything heavier than this is a typo, not a plate.
const MAX_UNITS: f64 = 1.0e9;

/// A non-negative weight in fixed-point milli-units.
///
/// Unit-agnostic: the same type carries kilograms or pounds. Sums and
/// multiples saturate at the largest representable weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct Weight(u64);

impl Weight {
    pub const ZERO: Weight = Weight(0);

    #[must_use]
    pub const fn from_milli(milli: u64) -> Self {
        Weight(milli)
    }

    #[must_use]
    pub const fn milli(self) -> u64 {
        self.0
    }

    ///
    /// # Errors
    /// If `value` is negative, not finite or too large to be a weight.
    ///
    pub fn try_from_f64(value: f64) -> Result<Self, LoadingError> {
        if !value.is_finite() || value < 0.0 || value > MAX_UNITS {
            return Err(LoadingError::InvalidWeight(value));
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let milli = (value * SCALE as f64).round() as u64;
        Ok(Weight(milli))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn saturating_sub(self, other: Weight) -> Weight {
        Weight(self.0.saturating_sub(other.0))
    }

    #[must_use]
    pub fn half(self) -> Weight {
        Weight(self.0 / 2)
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Weight {
    type Output = Weight;

    fn mul(self, rhs: u32) -> Weight {
        Weight(self.0.saturating_mul(u64::from(rhs)))
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::ZERO, |acc, weight| acc + weight)
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / SCALE;
        let fraction = self.0 % SCALE;

        if fraction == 0 {
            return write!(f, "{whole}");
        }

        let digits = format!("{fraction:03}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Weight {
    type Err = LoadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_alphabetic())
            .trim_end();

        let value = trimmed
            .parse::<f64>()
            .map_err(|_| LoadingError::InvalidWeightText(s.to_string()))?;

        Weight::try_from_f64(value)
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Weight::try_from_f64(value).map_err(serde::de::Error::custom)
    }
}
