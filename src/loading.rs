use std::collections::{HashMap, hash_map::Entry};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{bar::Bar, inventory::Inventory, loading_result::LoadingResult, weight::Weight};

/// Bounds on how much work a single search may do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Search nodes visited before settling for the best selection found so far.
    pub max_nodes: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_nodes: 1_000_000,
        }
    }
}

/// Pairs chosen per plate type, indexed like the inventory they were chosen from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    counts: Vec<u32>,
    sum: Weight,
    plates: u64,
    exhaustive: bool,
}

impl Selection {
    fn empty(types: usize) -> Self {
        Selection {
            counts: vec![0; types],
            sum: Weight::ZERO,
            plates: 0,
            exhaustive: true,
        }
    }

    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Per-side weight of the selection.
    #[must_use]
    pub fn sum(&self) -> Weight {
        self.sum
    }

    /// Plates on one side.
    #[must_use]
    pub fn plate_count(&self) -> u64 {
        self.plates
    }

    /// False when the node budget ran out before the search space was covered.
    #[must_use]
    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loader {
    limits: SearchLimits,
}

impl Loader {
    #[must_use]
    pub fn new(limits: SearchLimits) -> Self {
        Loader { limits }
    }

    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Finds the heaviest selection of pairs not exceeding `target`, using as
    /// few plates as possible among the heaviest.
    #[must_use]
    pub fn search(&self, target: Weight, inventory: &Inventory) -> Selection {
        if target.is_zero() || inventory.is_empty() {
            return Selection::empty(inventory.len());
        }

        let mut search = Search::new(target, inventory, self.limits);
        let mut path = Vec::with_capacity(inventory.len());
        let best = search.explore(0, 0, 0, &mut path, None);

        let selection = match best {
            Some(best) => Selection {
                counts: best.counts,
                sum: Weight::from_milli(best.sum),
                plates: best.plates,
                exhaustive: !search.truncated,
            },
            None => Selection::empty(inventory.len()),
        };

        debug!(
            target = %target,
            achieved = %selection.sum,
            plates = selection.plates,
            nodes = search.nodes,
            "plate search finished"
        );

        if !selection.exhaustive {
            warn!(
                target = %target,
                max_nodes = self.limits.max_nodes,
                "plate search hit its node budget, result may not be optimal"
            );
        }

        selection
    }

    #[must_use]
    pub fn compute(&self, total: Weight, bar: &Bar, inventory: &Inventory) -> LoadingResult {
        let target = bar.per_side_target(total);
        let selection = self.search(target, inventory);
        LoadingResult::assemble(target, *bar, inventory, &selection)
    }
}

/// Loads `total` onto `bar` from `inventory` with the default search limits.
#[must_use]
pub fn compute_loading(total: Weight, bar: &Bar, inventory: &Inventory) -> LoadingResult {
    Loader::default().compute(total, bar, inventory)
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Best {
    counts: Vec<u32>,
    sum: u64,
    plates: u64,
}

impl Best {
    fn beaten_by(&self, sum: u64, plates: u64) -> bool {
        sum > self.sum || (sum == self.sum && plates < self.plates)
    }
}

struct Search {
    target: u64,
    weights: Vec<u64>,
    pairs: Vec<u32>,
    // remaining[i]: per-side weight of every pair from type i onwards.
    remaining: Vec<u64>,
    // steps[i]: gcd of the usable weights from type i onwards, 0 when none are left.
    steps: Vec<u64>,
    // Fewest plates seen reaching each (type, sum).
    seen: HashMap<(usize, u64), u64>,
    max_nodes: u64,
    nodes: u64,
    truncated: bool,
}

impl Search {
    fn new(target: Weight, inventory: &Inventory, limits: SearchLimits) -> Self {
        let weights = inventory
            .iter()
            .map(|plate| plate.weight().milli())
            .collect::<Vec<_>>();
        let pairs = inventory.iter().map(|plate| plate.pairs()).collect::<Vec<_>>();

        let mut remaining = vec![0u64; weights.len() + 1];
        let mut steps = vec![0u64; weights.len() + 1];
        for i in (0..weights.len()).rev() {
            remaining[i] = remaining[i + 1]
                .saturating_add(weights[i].saturating_mul(u64::from(pairs[i])));
            steps[i] = match pairs[i] {
                0 => steps[i + 1],
                _ => gcd(weights[i], steps[i + 1]),
            };
        }

        Search {
            target: target.milli(),
            weights,
            pairs,
            remaining,
            steps,
            seen: HashMap::new(),
            max_nodes: limits.max_nodes,
            nodes: 0,
            truncated: false,
        }
    }

    fn explore(
        &mut self,
        index: usize,
        sum: u64,
        plates: u64,
        path: &mut Vec<u32>,
        best: Option<Best>,
    ) -> Option<Best> {
        self.nodes += 1;

        if let Some(current) = &best {
            if self.nodes > self.max_nodes {
                self.truncated = true;
                return best;
            }
            if !self.promising(index, sum, plates, current) {
                return best;
            }
        }

        // An earlier visit with no more plates already covered every completion from here.
        match self.seen.entry((index, sum)) {
            Entry::Occupied(entry) if *entry.get() <= plates => return best,
            Entry::Occupied(mut entry) => {
                entry.insert(plates);
            }
            Entry::Vacant(entry) => {
                entry.insert(plates);
            }
        }

        if index == self.weights.len() {
            return match best {
                Some(current) if !current.beaten_by(sum, plates) => Some(current),
                _ => Some(Best {
                    counts: path.clone(),
                    sum,
                    plates,
                }),
            };
        }

        let weight = self.weights[index];
        let fits = u32::try_from((self.target - sum) / weight).unwrap_or(u32::MAX);
        let most = self.pairs[index].min(fits);

        let mut best = best;
        for count in (0..=most).rev() {
            path.push(count);
            best = self.explore(
                index + 1,
                sum + weight * u64::from(count),
                plates + u64::from(count),
                path,
                best,
            );
            path.pop();

            if self.truncated {
                break;
            }
        }

        best
    }

    fn promising(&self, index: usize, sum: u64, plates: u64, best: &Best) -> bool {
        let room = self
            .target
            .min(sum.saturating_add(self.remaining[index]))
            - sum;
        let reach = match self.steps[index] {
            0 => sum,
            step => sum + room / step * step,
        };

        if reach < best.sum {
            return false;
        }

        // Tying the best sum only helps with strictly fewer plates.
        if reach == best.sum {
            let gap = best.sum - sum;
            let needed = match (gap, self.weights.get(index)) {
                (0, _) => 0,
                (_, Some(heaviest)) => gap.div_ceil(*heaviest),
                (_, None) => return false,
            };

            if plates + needed >= best.plates {
                return false;
            }
        }

        true
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    match b {
        0 => a,
        _ => gcd(b, a % b),
    }
}
