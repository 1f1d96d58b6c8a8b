use crate::config::SearchParams;
use crate::module::{Category, Module, Solution};
use crate::optimizer::{local_search, Campaign, Candidate};
use crate::scorer::Scorer;
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use tracing::{debug, warn};

/// A trait for receiving coarse status updates during optimization.
/// Side effects only; the return carries no control flow and there is no
/// cancellation primitive.
pub trait ProgressSink: Send + Sync {
    fn on_status(&self, status: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_status(&self, status: &str) {
        self(status);
    }
}

pub struct Orchestrator {
    scorer: Arc<Scorer>,
    params: SearchParams,
}

impl Orchestrator {
    pub fn new(scorer: Arc<Scorer>, params: SearchParams) -> Self {
        Self { scorer, params }
    }

    fn worker_count(&self) -> usize {
        self.params.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(2)
                .saturating_sub(1)
                .max(1)
        })
    }

    /// Runs parallel campaigns over the high-quality sub-pool, merges their
    /// populations as they complete, refines the best survivors against the
    /// entire candidate pool, and returns the top `top_n` by combat power.
    pub fn run(
        &self,
        candidates: &[Module],
        category: Category,
        prioritized: Option<&HashSet<String>>,
        top_n: usize,
        progress: &dyn ProgressSink,
    ) -> Vec<Solution> {
        let high_quality: Vec<Module> = candidates
            .iter()
            .filter(|m| m.total_part_value() >= self.params.quality_floor)
            .cloned()
            .collect();

        // An all-low-quality pool is still optimizable; campaigns fall back
        // to the full candidate set so a feasible pool never dead-ends.
        let campaign_pool = if high_quality.len() >= 4 {
            high_quality
        } else {
            candidates.to_vec()
        };

        let workers = self.worker_count();
        debug!(
            "launching {} campaigns over {} modules",
            workers,
            campaign_pool.len()
        );

        let pool = Arc::new(campaign_pool);
        let mut merged: Vec<Candidate> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let (tx, rx) = mpsc::channel::<(usize, Option<Vec<Candidate>>)>();
        let merged_ref = &mut merged;
        let seen_ref = &mut seen;
        rayon::scope(move |s| {
            for worker in 0..workers {
                let tx = tx.clone();
                let scorer = Arc::clone(&self.scorer);
                let pool = Arc::clone(&pool);
                let prioritized = prioritized.cloned();
                let params = self.params.clone();
                let seed = self.params.seed.map(|base| base + worker as u64);

                s.spawn(move |_| {
                    let outcome = catch_unwind(AssertUnwindSafe(|| {
                        Campaign::new(scorer, pool, category, prioritized, params, seed).run()
                    }));
                    let _ = tx.send((worker, outcome.ok()));
                });
            }
            drop(tx);

            // Results are merged in completion order, not spawn order.
            for (worker, outcome) in rx.iter() {
                match outcome {
                    Some(population) => {
                        for candidate in population {
                            if seen_ref.insert(candidate.combo_key()) {
                                merged_ref.push(candidate);
                            }
                        }
                        progress.on_status(&format!(
                            "campaign {} finished ({} unique combinations so far)",
                            worker,
                            merged_ref.len()
                        ));
                    }
                    None => {
                        warn!("campaign {} panicked; discarding its result", worker);
                    }
                }
            }
        });

        if merged.is_empty() {
            warn!("all campaigns returned empty populations");
            return Vec::new();
        }

        merged.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap()
                .then_with(|| a.combo_key().cmp(&b.combo_key()))
        });
        merged.truncate(self.params.refine_top);

        // Sequential refinement against the full candidate pool lets a rare
        // low-quality module into a slot the high-quality search missed.
        progress.on_status(&format!("refining top {} combinations", merged.len()));
        let refined: Vec<Candidate> = merged
            .iter()
            .map(|c| local_search(c, candidates, &self.scorer, category, prioritized))
            .collect();
        progress.on_status("refinement finished");

        let mut solutions: Vec<Solution> = refined
            .into_iter()
            .map(|c| {
                let (combat_power, attr_breakdown) = self.scorer.combat_power(&c.modules);
                Solution {
                    modules: c.modules,
                    attr_breakdown,
                    combat_power,
                    score: c.score,
                }
            })
            .collect();

        solutions.sort_by(|a, b| {
            b.combat_power
                .cmp(&a.combat_power)
                .then_with(|| a.combo_key().cmp(&b.combo_key()))
        });
        let mut solutions = dedup_by_tier_profile(solutions, &self.scorer);
        solutions.truncate(top_n);
        solutions
    }
}

/// Collapses solutions whose attribute-tier profile is identical, keeping the
/// first (best-ranked) representative. Stronger than uuid dedup: different
/// module sets reaching the same qualitative profile are redundant.
pub fn dedup_by_tier_profile(solutions: Vec<Solution>, scorer: &Scorer) -> Vec<Solution> {
    let mut seen: HashSet<Vec<(String, usize)>> = HashSet::new();
    solutions
        .into_iter()
        .filter(|s| seen.insert(scorer.tier_signature(&s.attr_breakdown)))
        .collect()
}
