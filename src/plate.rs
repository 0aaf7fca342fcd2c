use std::{fmt::Display, str::FromStr};

use crate::{loading_error::LoadingError, weight::Weight};

/// A plate denomination and how many matched pairs of it are available.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlateType {
    weight: Weight,
    pairs: u32,
    tag: Option<String>,
}

impl PlateType {
    ///
    /// # Errors
    /// If `weight` is zero.
    ///
    pub fn new(weight: Weight, pairs: u32, tag: Option<String>) -> Result<Self, LoadingError> {
        if weight.is_zero() {
            return Err(LoadingError::ZeroPlateWeight);
        }

        Ok(PlateType { weight, pairs, tag })
    }

    /// Builds a plate type from a physical plate count. Odd plates cannot be loaded symmetrically.
    ///
    /// # Errors
    /// If `weight` is zero.
    ///
    pub fn from_physical(
        weight: Weight,
        plates: u32,
        tag: Option<String>,
    ) -> Result<Self, LoadingError> {
        Self::new(weight, plates / 2, tag)
    }

    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[must_use]
    pub fn pairs(&self) -> u32 {
        self.pairs
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Per-side weight when every pair is loaded.
    #[must_use]
    pub fn capacity(&self) -> Weight {
        self.weight * self.pairs
    }
}

impl Display for PlateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.weight, self.pairs)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        Ok(())
    }
}

impl FromStr for PlateType {
    type Err = LoadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LoadingError::InvalidPlate(s.to_string());

        let (plate, tag) = match s.split_once(':') {
            Some((plate, tag)) if !tag.is_empty() => (plate, Some(tag.to_string())),
            Some(_) => return Err(invalid()),
            None => (s, None),
        };

        let (weight, pairs) = plate.split_once(['x', 'X']).ok_or_else(invalid)?;
        let weight = weight.parse::<Weight>().map_err(|_| invalid())?;
        let pairs = pairs.trim().parse::<u32>().map_err(|_| invalid())?;

        PlateType::new(weight, pairs, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_count_rounds_down_to_pairs() {
        let plate = PlateType::from_physical(Weight::from_milli(5000), 5, None).unwrap();
        assert_eq!(plate.pairs(), 2);
        assert_eq!(plate.capacity(), Weight::from_milli(10_000));
    }

    #[test]
    fn zero_weight_is_rejected() {
        assert_eq!(
            PlateType::new(Weight::ZERO, 4, None),
            Err(LoadingError::ZeroPlateWeight)
        );
    }

    #[test]
    fn parses_plate_text() {
        let plate = "2.5x10:#cfcfcf".parse::<PlateType>().unwrap();
        assert_eq!(plate.weight(), Weight::from_milli(2500));
        assert_eq!(plate.pairs(), 10);
        assert_eq!(plate.tag(), Some("#cfcfcf"));

        let untagged = "20X3".parse::<PlateType>().unwrap();
        assert_eq!(untagged.tag(), None);
        assert_eq!(untagged.to_string(), "20x3");
    }

    #[test]
    fn rejects_malformed_plate_text() {
        for text in ["20", "x4", "20x-1", "20x4:", "0x4"] {
            assert!(text.parse::<PlateType>().is_err(), "{text} should not parse");
        }
    }
}
