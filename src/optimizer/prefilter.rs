use crate::module::Module;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Drops every module carrying an attribute outside the allowed set. Strict
/// pre-pass for priority-constrained searches.
pub fn restrict_to_priority(pool: &[Module], allowed: &HashSet<String>) -> Vec<Module> {
    pool.iter()
        .filter(|m| m.parts.iter().all(|p| allowed.contains(&p.name)))
        .cloned()
        .collect()
}

/// Attribute names observed anywhere in the pool.
pub fn observed_attrs(pool: &[Module]) -> BTreeSet<String> {
    pool.iter()
        .flat_map(|m| m.parts.iter())
        .filter(|p| p.value > 0)
        .map(|p| p.name.clone())
        .collect()
}

/// Shrinks a pool to a bounded candidate set that keeps both specialists and
/// generalists: the top `per_attr` modules for every observed attribute, plus
/// the top `by_total` modules by total part value, deduplicated by uuid.
pub fn prefilter(pool: &[Module], per_attr: usize, by_total: usize) -> Vec<Module> {
    let mut candidates: Vec<Module> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut admit = |module: &Module, candidates: &mut Vec<Module>| {
        if seen.insert(module.uuid.clone()) {
            candidates.push(module.clone());
        }
    };

    for attr in observed_attrs(pool) {
        let mut ranked: Vec<(&Module, u32)> = pool
            .iter()
            .filter_map(|m| {
                m.parts
                    .iter()
                    .find(|p| p.name == attr && p.value > 0)
                    .map(|p| (m, p.value))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.uuid.cmp(&b.0.uuid)));
        for (module, _) in ranked.into_iter().take(per_attr) {
            admit(module, &mut candidates);
        }
    }

    let mut by_sum: Vec<&Module> = pool.iter().collect();
    by_sum.sort_by(|a, b| {
        b.total_part_value()
            .cmp(&a.total_part_value())
            .then_with(|| a.uuid.cmp(&b.uuid))
    });
    for module in by_sum.into_iter().take(by_total) {
        admit(module, &mut candidates);
    }

    debug!(
        "prefilter kept {} of {} modules ({} attributes observed)",
        candidates.len(),
        pool.len(),
        observed_attrs(pool).len()
    );
    candidates
}
