// ===== modforge/src/api.rs =====
use crate::config::Config;
use crate::module::{Category, Module, Solution};
use crate::optimizer::prefilter;
use crate::optimizer::{Orchestrator, ProgressSink};
use crate::scorer::Scorer;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Minimum overlap between the priority set and the attributes actually
/// present in the pool for a priority-constrained search to be worth running.
const MIN_USABLE_PRIORITY_ATTRS: usize = 2;

/// Public entry point: validates feasibility, prefilters the pool, drives the
/// parallel campaigns and refinement, and returns the ranked solutions.
///
/// Infeasibility (too few modules in the category, prefilter collapse, or a
/// priority set that barely intersects the pool) is a normal outcome: a
/// diagnostic is logged and an empty list returned. Errors are never raised
/// for these cases.
pub fn optimize_modules(
    config: &Config,
    pool: &[Module],
    category: Category,
    top_n: usize,
    prioritized: Option<&[String]>,
    progress: &dyn ProgressSink,
) -> Vec<Solution> {
    let scorer = match Scorer::new(config.tables.clone()) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            warn!("invalid scoring tables: {}", e);
            return Vec::new();
        }
    };

    let filtered: Vec<Module> = if category == Category::All {
        pool.to_vec()
    } else {
        pool.iter()
            .filter(|m| config.catalog.category_of(m.config_id) == category)
            .cloned()
            .collect()
    };
    info!(
        "optimizing {} of {} modules in category {}",
        filtered.len(),
        pool.len(),
        category
    );

    if filtered.len() < 4 {
        warn!(
            "category {} has only {} modules; at least 4 are required",
            category,
            filtered.len()
        );
        return Vec::new();
    }

    let priority_set: Option<HashSet<String>> =
        prioritized.map(|attrs| attrs.iter().cloned().collect());

    let eligible = match &priority_set {
        Some(wanted) => {
            let restricted = prefilter::restrict_to_priority(&filtered, wanted);
            let usable = prefilter::observed_attrs(&restricted)
                .iter()
                .filter(|a| wanted.contains(*a))
                .count();
            if usable < MIN_USABLE_PRIORITY_ATTRS {
                warn!(
                    "only {} prioritized attributes are present in the pool; \
                     at least {} are required",
                    usable, MIN_USABLE_PRIORITY_ATTRS
                );
                return Vec::new();
            }
            restricted
        }
        None => filtered,
    };

    let candidates = prefilter::prefilter(
        &eligible,
        config.search.prefilter_per_attr,
        config.search.prefilter_by_total,
    );
    progress.on_status(&format!(
        "prefilter kept {} candidate modules",
        candidates.len()
    ));

    if candidates.len() < 4 {
        warn!(
            "candidate pool collapsed to {} modules; cannot form a combination",
            candidates.len()
        );
        return Vec::new();
    }

    let orchestrator = Orchestrator::new(scorer, config.search.clone());
    orchestrator.run(&candidates, category, priority_set.as_ref(), top_n, progress)
}
