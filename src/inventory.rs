use itertools::Itertools;

use crate::{plate::PlateType, weight::Weight};

/// An immutable snapshot of plate types, heaviest first.
///
/// Plate types of equal weight keep the order the caller gave them in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    plates: Vec<PlateType>,
}

impl Inventory {
    #[must_use]
    pub fn new(plates: Vec<PlateType>) -> Self {
        Inventory {
            plates: plates
                .into_iter()
                .sorted_by(|a, b| b.weight().cmp(&a.weight()))
                .collect(),
        }
    }

    #[must_use]
    pub fn plates(&self) -> &[PlateType] {
        &self.plates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlateType> {
        self.plates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    /// Heaviest single side the inventory can load.
    #[must_use]
    pub fn total_per_side(&self) -> Weight {
        self.plates.iter().map(PlateType::capacity).sum()
    }
}

impl FromIterator<PlateType> for Inventory {
    fn from_iter<I: IntoIterator<Item = PlateType>>(iter: I) -> Self {
        Inventory::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a PlateType;
    type IntoIter = std::slice::Iter<'a, PlateType>;

    fn into_iter(self) -> Self::IntoIter {
        self.plates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate(text: &str) -> PlateType {
        text.parse().unwrap()
    }

    #[test]
    fn sorts_heaviest_first_keeping_ties_in_order() {
        let inventory = Inventory::new(vec![
            plate("5x2:white"),
            plate("20x1:blue"),
            plate("5x4:black"),
            plate("10x3"),
        ]);

        let order = inventory.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(order, ["20x1:blue", "10x3", "5x2:white", "5x4:black"]);
    }

    #[test]
    fn total_per_side_counts_every_pair() {
        let inventory: Inventory = [plate("20x2"), plate("1.25x3")].into_iter().collect();
        assert_eq!(inventory.total_per_side(), Weight::from_milli(43_750));
        assert!(Inventory::default().total_per_side().is_zero());
    }

    #[test]
    fn total_per_side_saturates_on_huge_inventories() {
        let huge = PlateType::new(Weight::try_from_f64(1.0e9).unwrap(), u32::MAX, None).unwrap();
        let inventory = Inventory::new(vec![huge.clone(), huge]);
        assert_eq!(inventory.total_per_side().milli(), u64::MAX);
    }
}
