use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

/// One named attribute roll on a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePart {
    pub id: u32,
    pub name: String,
    pub value: u32,
}

/// An equipment module as produced by the upstream wire decoder.
/// Immutable after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub uuid: String,
    pub name: String,
    pub config_id: u32,
    pub quality: u32,
    pub parts: Vec<ModulePart>,
}

impl Module {
    /// Sum of all part values. Used for quality tiering and generalist ranking.
    pub fn total_part_value(&self) -> u32 {
        self.parts.iter().map(|p| p.value).sum()
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name == name)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[default]
    Attack,
    Guardian,
    Support,
    All,
}

/// A finalized 4-module combination returned to the caller.
///
/// `attr_breakdown` and `combat_power` are derived from `modules` at
/// construction and never mutated independently. Modules are kept sorted by
/// uuid so the combination identity is stable.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub modules: Vec<Module>,
    pub attr_breakdown: BTreeMap<String, u32>,
    pub combat_power: u64,
    pub score: f64,
}

impl Solution {
    /// Combination identity: the uuid-sorted member tuple.
    pub fn combo_key(&self) -> String {
        combo_key(&self.modules)
    }

    pub fn total_breakdown_value(&self) -> u32 {
        self.attr_breakdown.values().sum()
    }
}

/// Identity of a module set, independent of member order.
pub fn combo_key(modules: &[Module]) -> String {
    let mut uuids: Vec<&str> = modules.iter().map(|m| m.uuid.as_str()).collect();
    uuids.sort_unstable();
    uuids.join("|")
}
