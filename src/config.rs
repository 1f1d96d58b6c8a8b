use crate::error::{ModForgeError, ModResult};
use crate::module::Category;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub search: SearchParams,
    pub tables: ScoringTables,
    pub catalog: Catalog,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 100)]
    pub population_size: usize,
    #[arg(long, default_value_t = 40)]
    pub generations: usize,
    #[arg(long, default_value_t = 5)]
    pub tournament_size: usize,
    #[arg(long, default_value_t = 0.8)]
    pub crossover_rate: f64,
    #[arg(long, default_value_t = 0.1)]
    pub mutation_rate: f64,
    #[arg(long, default_value_t = 0.10)]
    pub elite_fraction: f64,
    #[arg(long, default_value_t = 0.30)]
    pub local_search_fraction: f64,
    #[arg(long, default_value_t = 30)]
    pub refine_top: usize,
    #[arg(long, default_value_t = 12)]
    pub quality_floor: u32,
    #[arg(long, default_value_t = 30)]
    pub prefilter_per_attr: usize,
    #[arg(long, default_value_t = 50)]
    pub prefilter_by_total: usize,

    /// Worker count override. Defaults to available cores minus one.
    #[arg(long)]
    pub workers: Option<usize>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 40,
            tournament_size: 5,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elite_fraction: 0.10,
            local_search_fraction: 0.30,
            refine_top: 30,
            quality_floor: 12,
            prefilter_per_attr: 30,
            prefilter_by_total: 50,
            workers: None,
            seed: None,
        }
    }
}

/// Static scoring data supplied by the game: attribute tier thresholds, the
/// per-tier power tables, the exact-sum bonus table, and the attribute sets
/// that drive category affinity and the cross-type penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTables {
    /// Ascending tier breakpoints. Tier index = count of breakpoints met.
    pub thresholds: Vec<u32>,
    /// Combat power per tier index, basic attributes. Index 0 is "no tier".
    pub basic_power: Vec<u64>,
    /// Combat power per tier index, special attributes.
    pub special_power: Vec<u64>,
    /// Bonus power keyed by the exact grand sum of all breakdown values.
    /// Missing keys contribute zero. No interpolation.
    pub total_value_bonus: BTreeMap<u32, u64>,
    /// Attribute names scored with the special power table.
    pub special_attrs: Vec<String>,
    pub attack_targets: Vec<String>,
    pub guardian_targets: Vec<String>,
    pub support_targets: Vec<String>,
    pub physical_attrs: Vec<String>,
    pub magic_attrs: Vec<String>,
}

impl Default for ScoringTables {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            thresholds: vec![1, 4, 8, 12, 16, 20],
            basic_power: vec![0, 3, 8, 15, 40, 90, 180],
            special_power: vec![0, 6, 16, 30, 80, 180, 360],
            total_value_bonus: BTreeMap::from([
                (20, 5),
                (24, 10),
                (28, 18),
                (32, 28),
                (36, 40),
                (40, 55),
                (44, 75),
                (48, 100),
                (52, 130),
                (56, 165),
                (60, 205),
            ]),
            special_attrs: owned(&[
                "Special Attack Damage",
                "Elite Strike",
                "Special Healing Boost",
                "Expert Healing Boost",
            ]),
            attack_targets: owned(&[
                "Strength Boost",
                "Agility Boost",
                "Intelligence Boost",
                "Special Attack Damage",
                "Elite Strike",
            ]),
            guardian_targets: owned(&["Magic Resistance", "Physical Resistance"]),
            support_targets: owned(&[
                "Special Healing Boost",
                "Expert Healing Boost",
                "Casting Focus",
            ]),
            physical_attrs: owned(&["Strength Boost", "Agility Boost"]),
            magic_attrs: owned(&["Intelligence Boost", "Casting Focus"]),
        }
    }
}

impl ScoringTables {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ModResult<Self> {
        let content = fs::read_to_string(path)?;
        let tables: Self = serde_json::from_str(&content)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> ModResult<()> {
        if self.thresholds.is_empty() {
            return Err(ModForgeError::Config("thresholds must not be empty".into()));
        }
        if !self.thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(ModForgeError::Config(
                "thresholds must be strictly ascending".into(),
            ));
        }
        let tiers = self.thresholds.len() + 1;
        for (name, table) in [("basic_power", &self.basic_power), ("special_power", &self.special_power)] {
            if table.len() != tiers {
                return Err(ModForgeError::Config(format!(
                    "{} must have {} entries (one per tier), got {}",
                    name,
                    tiers,
                    table.len()
                )));
            }
        }
        Ok(())
    }

    pub fn targets(&self, category: Category) -> &[String] {
        match category {
            Category::Attack => &self.attack_targets,
            Category::Guardian => &self.guardian_targets,
            Category::Support => &self.support_targets,
            Category::All => &[],
        }
    }
}

/// Static id-to-name mappings supplied by the game data dump: module display
/// names, attribute names, and the module-type to category mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub module_names: BTreeMap<u32, String>,
    pub attr_names: BTreeMap<u32, String>,
    pub categories: BTreeMap<u32, Category>,
}

impl Default for Catalog {
    fn default() -> Self {
        let module_names = BTreeMap::from(
            [
                (5500101, "Basic Attack"),
                (5500102, "High-Performance Attack"),
                (5500201, "Basic Healing"),
                (5500202, "High-Performance Healing"),
                (5500301, "Basic Protection"),
                (5500302, "High-Performance Protection"),
            ]
            .map(|(id, name)| (id, name.to_string())),
        );
        let attr_names = BTreeMap::from(
            [
                (1110, "Strength Boost"),
                (1111, "Agility Boost"),
                (1112, "Intelligence Boost"),
                (1113, "Special Attack Damage"),
                (1114, "Elite Strike"),
                (1205, "Special Healing Boost"),
                (1206, "Expert Healing Boost"),
                (1307, "Magic Resistance"),
                (1308, "Physical Resistance"),
                (1407, "Casting Focus"),
                (1408, "Attack Speed Focus"),
                (1409, "Critical Focus"),
                (1410, "Luck Focus"),
            ]
            .map(|(id, name)| (id, name.to_string())),
        );
        let categories = BTreeMap::from([
            (5500101, Category::Attack),
            (5500102, Category::Attack),
            (5500201, Category::Support),
            (5500202, Category::Support),
            (5500301, Category::Guardian),
            (5500302, Category::Guardian),
        ]);
        Self {
            module_names,
            attr_names,
            categories,
        }
    }
}

impl Catalog {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ModResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Unmapped module types default to Attack, matching the game client.
    pub fn category_of(&self, config_id: u32) -> Category {
        self.categories
            .get(&config_id)
            .copied()
            .unwrap_or(Category::Attack)
    }
}
