use crate::config::ScoringTables;
use crate::module::{Category, Module};
use std::collections::{BTreeMap, HashSet};

// Fitness shaping constants. These are search-time heuristics, not game data,
// which is why they live here rather than in ScoringTables.
const PRIORITY_MATCH_BONUS: f64 = 100.0;
const PRIORITY_MISS_PENALTY: f64 = 50.0;
const MIN_PRIORITY_MATCHES: usize = 2;
const AFFINITY_PER_POINT: f64 = 5.0;
const CROSS_TYPE_PENALTY: f64 = 10.0;
const TOTAL_VALUE_TIEBREAK: f64 = 0.1;

/// Pure scoring over the static tables: combat power for ranking and display,
/// fitness for the genetic search. Both derive everything from the module set.
pub struct Scorer {
    tables: ScoringTables,
    special: HashSet<String>,
    physical: HashSet<String>,
    magic: HashSet<String>,
}

impl Scorer {
    pub fn new(tables: ScoringTables) -> crate::error::ModResult<Self> {
        tables.validate()?;
        let special = tables.special_attrs.iter().cloned().collect();
        let physical = tables.physical_attrs.iter().cloned().collect();
        let magic = tables.magic_attrs.iter().cloned().collect();
        Ok(Self {
            tables,
            special,
            physical,
            magic,
        })
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    /// Tier index for a summed attribute value: the number of breakpoints met.
    pub fn tier(&self, value: u32) -> usize {
        self.tables
            .thresholds
            .iter()
            .take_while(|&&t| value >= t)
            .count()
    }

    /// Highest breakpoint met by `value`, if any. Used for tier labels.
    pub fn met_threshold(&self, value: u32) -> Option<u32> {
        self.tables
            .thresholds
            .iter()
            .copied()
            .take_while(|&t| value >= t)
            .last()
    }

    /// Summed attribute values across a module set. Zero-valued entries are
    /// dropped so the breakdown only carries attributes that are present.
    pub fn attr_breakdown(modules: &[Module]) -> BTreeMap<String, u32> {
        let mut breakdown: BTreeMap<String, u32> = BTreeMap::new();
        for module in modules {
            for part in &module.parts {
                if part.value > 0 {
                    *breakdown.entry(part.name.clone()).or_insert(0) += part.value;
                }
            }
        }
        breakdown
    }

    /// Tier power contribution of a single summed attribute.
    pub fn attr_power(&self, name: &str, value: u32) -> u64 {
        let table = if self.special.contains(name) {
            &self.tables.special_power
        } else {
            &self.tables.basic_power
        };
        let idx = self.tier(value).min(table.len() - 1);
        table[idx]
    }

    /// Combat power of a module set: per-attribute tier power plus the
    /// exact-sum bonus. Deterministic and order-independent.
    pub fn combat_power(&self, modules: &[Module]) -> (u64, BTreeMap<String, u32>) {
        let breakdown = Self::attr_breakdown(modules);
        let mut power: u64 = breakdown
            .iter()
            .map(|(name, &value)| self.attr_power(name, value))
            .sum();

        let grand_sum: u32 = breakdown.values().sum();
        power += self
            .tables
            .total_value_bonus
            .get(&grand_sum)
            .copied()
            .unwrap_or(0);

        (power, breakdown)
    }

    /// Search fitness of a module set. Infeasible sets (fewer than 4 distinct
    /// modules, or too few prioritized attributes) score 0 rather than erroring.
    pub fn fitness(
        &self,
        modules: &[Module],
        category: Category,
        prioritized: Option<&HashSet<String>>,
    ) -> f64 {
        let distinct: HashSet<&str> = modules.iter().map(|m| m.uuid.as_str()).collect();
        if distinct.len() < 4 {
            return 0.0;
        }

        let breakdown = Self::attr_breakdown(modules);
        let mut score = 0.0;

        if let Some(wanted) = prioritized {
            let matching = breakdown.keys().filter(|k| wanted.contains(*k)).count();
            if matching < MIN_PRIORITY_MATCHES {
                return 0.0;
            }
            for name in breakdown.keys() {
                if wanted.contains(name) {
                    score += PRIORITY_MATCH_BONUS;
                } else {
                    score -= PRIORITY_MISS_PENALTY;
                }
            }
        }

        let targets = self.tables.targets(category);
        for (name, &value) in &breakdown {
            score += tier_bonus(value);
            if targets.iter().any(|t| t == name) {
                score += f64::from(value) * AFFINITY_PER_POINT;
            }
        }

        // Mixing physical and magic attributes wastes tier budget on stats a
        // single build can never use together.
        let physical_sum: u32 = breakdown
            .iter()
            .filter(|(name, _)| self.physical.contains(*name))
            .map(|(_, &v)| v)
            .sum();
        let magic_sum: u32 = breakdown
            .iter()
            .filter(|(name, _)| self.magic.contains(*name))
            .map(|(_, &v)| v)
            .sum();
        if physical_sum > 0 && magic_sum > 0 {
            score -= CROSS_TYPE_PENALTY * f64::from(physical_sum.min(magic_sum));
        }

        let total: u32 = breakdown.values().sum();
        score += TOTAL_VALUE_TIEBREAK * f64::from(total);

        score.max(0.0)
    }

    /// Lossy identity of a breakdown: each attribute bucketed into its tier.
    /// Two sets with the same profile are interchangeable for display purposes.
    pub fn tier_signature(&self, breakdown: &BTreeMap<String, u32>) -> Vec<(String, usize)> {
        breakdown
            .iter()
            .map(|(name, &value)| (name.clone(), self.tier(value)))
            .collect()
    }
}

/// Reaching a high breakpoint matters far more than raw points, so the bonus
/// jumps at 12/16/20 and only the highest band reached counts.
fn tier_bonus(value: u32) -> f64 {
    let v = f64::from(value);
    if value >= 20 {
        1000.0 + (v - 20.0) * 20.0
    } else if value >= 16 {
        500.0 + (v - 16.0) * 15.0
    } else if value >= 12 {
        100.0 + (v - 12.0) * 5.0
    } else {
        0.0
    }
}
