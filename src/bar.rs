use std::fmt::Display;

use crate::weight::Weight;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bar {
    weight: Weight,
}

impl Bar {
    #[must_use]
    pub fn new(weight: Weight) -> Self {
        Bar { weight }
    }

    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Weight to add to each side to reach `total`.
    ///
    /// Zero when the bar alone is already heavy enough. An odd milli-unit is
    /// dropped so the target never exceeds half of what remains.
    #[must_use]
    pub fn per_side_target(&self, total: Weight) -> Weight {
        total.saturating_sub(self.weight).half()
    }
}

impl Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bar", self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(milli: u64) -> Weight {
        Weight::from_milli(milli)
    }

    #[test]
    fn halves_what_the_bar_does_not_carry() {
        assert_eq!(Bar::new(w(20_000)).per_side_target(w(62_500)), w(21_250));
    }

    #[test]
    fn nothing_to_load_at_or_below_bar_weight() {
        let bar = Bar::new(w(20_000));
        assert_eq!(bar.per_side_target(w(20_000)), Weight::ZERO);
        assert_eq!(bar.per_side_target(w(15_000)), Weight::ZERO);
        assert_eq!(Bar::default().per_side_target(Weight::ZERO), Weight::ZERO);
    }

    #[test]
    fn odd_milli_rounds_down() {
        assert_eq!(Bar::new(w(20_000)).per_side_target(w(20_001)), Weight::ZERO);
        assert_eq!(Bar::new(w(0)).per_side_target(w(3)), w(1));
    }
}
