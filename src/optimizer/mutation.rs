use crate::module::Module;
use fastrand::Rng;

/// Samples 4 distinct modules uniformly from the pool. Returns None when the
/// pool cannot form a combination.
pub fn sample_combination(pool: &[Module], rng: &mut Rng) -> Option<Vec<Module>> {
    if pool.len() < 4 {
        return None;
    }
    let mut picked: Vec<usize> = Vec::with_capacity(4);
    while picked.len() < 4 {
        let idx = rng.usize(0..pool.len());
        if !picked.contains(&idx) {
            picked.push(idx);
        }
    }
    Some(picked.into_iter().map(|i| pool[i].clone()).collect())
}

/// Replaces one randomly chosen slot with a random pool module that is not
/// already a member. A pool with no replacement candidates leaves the set
/// untouched.
pub fn mutate_slot(modules: &mut [Module], pool: &[Module], rng: &mut Rng) {
    let candidates: Vec<&Module> = pool
        .iter()
        .filter(|m| !modules.iter().any(|member| member.uuid == m.uuid))
        .collect();
    if candidates.is_empty() {
        return;
    }
    let slot = rng.usize(0..modules.len());
    modules[slot] = candidates[rng.usize(0..candidates.len())].clone();
}
