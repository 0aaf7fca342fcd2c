use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;

use crate::{bar::Bar, inventory::Inventory, loading::Selection, weight::Weight};

/// One plate on one side of the bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadedPlate {
    weight: Weight,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl LoadedPlate {
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadingResult {
    target: Weight,
    bar: Weight,
    achieved: Weight,
    deficit: Weight,
    plates: Vec<LoadedPlate>,
    exhaustive: bool,
}

impl LoadingResult {
    /// Flattens the pairs chosen per plate type into the plates seen on one side, heaviest first.
    #[must_use]
    pub fn assemble(
        target: Weight,
        bar: Bar,
        inventory: &Inventory,
        selection: &Selection,
    ) -> Self {
        let plates = inventory
            .iter()
            .zip(selection.counts())
            .flat_map(|(plate, count)| {
                std::iter::repeat_n(
                    LoadedPlate {
                        weight: plate.weight(),
                        tag: plate.tag().map(str::to_string),
                    },
                    *count as usize,
                )
            })
            .collect();

        LoadingResult {
            target,
            bar: bar.weight(),
            achieved: selection.sum(),
            deficit: target.saturating_sub(selection.sum()),
            plates,
            exhaustive: selection.is_exhaustive(),
        }
    }

    /// Requested weight per side.
    #[must_use]
    pub fn target(&self) -> Weight {
        self.target
    }

    #[must_use]
    pub fn bar(&self) -> Weight {
        self.bar
    }

    /// Weight actually loaded per side.
    #[must_use]
    pub fn achieved(&self) -> Weight {
        self.achieved
    }

    /// Per-side shortfall, zero on an exact match.
    #[must_use]
    pub fn deficit(&self) -> Weight {
        self.deficit
    }

    #[must_use]
    pub fn plates(&self) -> &[LoadedPlate] {
        &self.plates
    }

    #[must_use]
    pub fn into_plates(self) -> Vec<LoadedPlate> {
        self.plates
    }

    #[must_use]
    pub fn plate_count(&self) -> usize {
        self.plates.len()
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.deficit.is_zero()
    }

    #[must_use]
    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    /// Weight on the bar once both sides are loaded.
    #[must_use]
    pub fn total(&self) -> Weight {
        self.bar + self.achieved * 2
    }
}

impl Display for LoadingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} bar + {}/side [{}]",
            self.total(),
            self.bar,
            self.achieved,
            self.plates.iter().map(|plate| plate.weight).join(", ")
        )?;

        if !self.is_exact() {
            write!(f, " (short {}/side)", self.deficit)?;
        }

        Ok(())
    }
}
