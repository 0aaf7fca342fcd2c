//! Caller-side policy: which bar and plates a loading is computed against.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{bar::Bar, inventory::Inventory, loading::SearchLimits, plate::PlateType, weight::Weight};

/// Environment variable naming a config file when none is passed explicitly.
pub const CONFIG_ENV: &str = "PLATE_LOADER_CONFIG";

const DEFAULT_BAR: Weight = Weight::from_milli(20_000);
const DEFAULT_PLATES: [u64; 7] = [25_000, 20_000, 15_000, 10_000, 5_000, 2_500, 1_250];
const DEFAULT_PAIRS: u32 = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_bar")]
    pub bar_weight: Weight,
    #[serde(default)]
    pub search: SearchLimits,
    #[serde(default = "default_plates")]
    pub plates: Vec<PlateEntry>,
}

/// A plate as written in a config file. Either `pairs` or a physical `count` is given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateEntry {
    pub weight: Weight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl PlateEntry {
    ///
    /// # Errors
    /// If the entry gives both or neither of `pairs` and `count`, or weighs nothing.
    ///
    pub fn plate_type(&self) -> Result<PlateType> {
        let tag = self
            .tag
            .clone()
            .or_else(|| Some(plate_color(self.weight).to_string()));

        let plate = match (self.pairs, self.count) {
            (Some(pairs), None) => PlateType::new(self.weight, pairs, tag)?,
            (None, Some(count)) => PlateType::from_physical(self.weight, count, tag)?,
            _ => bail!(
                "Plate {} needs exactly one of `pairs` or `count`.",
                self.weight
            ),
        };

        Ok(plate)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bar_weight: default_bar(),
            search: SearchLimits::default(),
            plates: default_plates(),
        }
    }
}

impl Config {
    ///
    /// # Errors
    /// If the file cannot be read or is not a valid config.
    ///
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        // Bad plate entries fail here, not on first use.
        config.inventory()?;

        debug!(path = %path.display(), plates = config.plates.len(), "loaded config");
        Ok(config)
    }

    /// Loads `path` if given, else the file named by [`CONFIG_ENV`], else the defaults.
    ///
    /// # Errors
    /// If a named config file cannot be loaded.
    ///
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    ///
    /// # Errors
    /// If any plate entry is invalid.
    ///
    pub fn inventory(&self) -> Result<Inventory> {
        self.plates.iter().map(PlateEntry::plate_type).collect()
    }

    #[must_use]
    pub fn bar(&self) -> Bar {
        Bar::new(self.bar_weight)
    }

    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        self.search
    }
}

/// Conventional competition colour for a plate of `weight`.
#[must_use]
pub fn plate_color(weight: Weight) -> &'static str {
    match weight.milli() {
        25_000.. => "#ff0000",
        20_000.. => "#0000ff",
        15_000.. => "#ffff00",
        10_000.. => "#00ff00",
        5_000.. => "#ffffff",
        _ => "#cfcfcf",
    }
}

fn default_bar() -> Weight {
    DEFAULT_BAR
}

fn default_plates() -> Vec<PlateEntry> {
    DEFAULT_PLATES
        .iter()
        .map(|milli| PlateEntry {
            weight: Weight::from_milli(*milli),
            pairs: Some(DEFAULT_PAIRS),
            count: None,
            tag: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_conventional_plate_set() {
        let config = Config::default();
        let inventory = config.inventory().unwrap();

        assert_eq!(config.bar().weight(), Weight::from_milli(20_000));
        assert_eq!(inventory.len(), 7);
        assert_eq!(inventory.plates()[0].tag(), Some("#ff0000"));
        assert_eq!(inventory.plates()[6].tag(), Some("#cfcfcf"));
        assert!(inventory.iter().all(|plate| plate.pairs() == 10));
    }

    #[test]
    fn parses_toml_with_pairs_and_physical_counts() {
        let config: Config = toml::from_str(
            r##"
            bar_weight = 15

            [search]
            max_nodes = 5000

            [[plates]]
            weight = 10
            count = 5
            tag = "green"

            [[plates]]
            weight = 2.5
            pairs = 3
            "##,
        )
        .unwrap();

        let inventory = config.inventory().unwrap();
        assert_eq!(config.bar().weight(), Weight::from_milli(15_000));
        assert_eq!(config.limits().max_nodes, 5000);
        assert_eq!(inventory.plates()[0].pairs(), 2);
        assert_eq!(inventory.plates()[0].tag(), Some("green"));
        assert_eq!(inventory.plates()[1].tag(), Some("#cfcfcf"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("bar_weight = 10").unwrap();
        assert_eq!(config.plates, default_plates());
        assert_eq!(config.search, SearchLimits::default());
    }

    #[test]
    fn entry_needs_exactly_one_count() {
        let config: Config = toml::from_str(
            r"
            [[plates]]
            weight = 5
            pairs = 2
            count = 4
            ",
        )
        .unwrap();
        assert!(config.inventory().is_err());

        assert!(toml::from_str::<Config>("bar_weight = -20").is_err());
    }

    #[test]
    fn colours_follow_weight_bands() {
        assert_eq!(plate_color(Weight::from_milli(45_000)), "#ff0000");
        assert_eq!(plate_color(Weight::from_milli(20_000)), "#0000ff");
        assert_eq!(plate_color(Weight::from_milli(2_500)), "#cfcfcf");
    }
}
