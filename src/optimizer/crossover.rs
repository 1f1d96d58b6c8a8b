use crate::module::Module;

/// Combines two parent module sets into a child.
///
/// The child inherits the first two modules of parent A (members are kept
/// uuid-sorted, so "first two" is stable) and fills the remaining slots from
/// parent B, skipping uuids already present. If that does not produce 4
/// distinct modules the child degrades to a copy of parent A rather than an
/// invalid combination.
pub fn crossover_fill(parent_a: &[Module], parent_b: &[Module]) -> Vec<Module> {
    let mut child: Vec<Module> = parent_a.iter().take(2).cloned().collect();

    for module in parent_b {
        if child.len() == 4 {
            break;
        }
        if !child.iter().any(|m| m.uuid == module.uuid) {
            child.push(module.clone());
        }
    }

    if child.len() < 4 {
        return parent_a.to_vec();
    }
    child
}
