pub mod crossover;
pub mod mutation;
pub mod prefilter;
pub mod runner;

pub use self::runner::{Orchestrator, ProgressSink};

use crate::config::SearchParams;
use crate::module::{combo_key, Category, Module};
use crate::scorer::Scorer;
use std::collections::HashSet;
use std::sync::Arc;

/// A scored combination as carried through the search. Modules are kept
/// uuid-sorted; improvements replace the candidate wholesale, the module list
/// is never mutated in place.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub modules: Vec<Module>,
    pub score: f64,
}

impl Candidate {
    pub fn scored(
        mut modules: Vec<Module>,
        scorer: &Scorer,
        category: Category,
        prioritized: Option<&HashSet<String>>,
    ) -> Self {
        modules.sort_by(|a, b| a.uuid.cmp(&b.uuid));
        let score = scorer.fitness(&modules, category, prioritized);
        Self { modules, score }
    }

    pub fn combo_key(&self) -> String {
        combo_key(&self.modules)
    }
}

/// Number of distinct 4-subsets of a pool.
pub fn combinations4(n: usize) -> u64 {
    if n < 4 {
        return 0;
    }
    let n = n as u64;
    n * (n - 1) * (n - 2) * (n - 3) / 24
}

/// One self-contained genetic run over a candidate pool. No state is shared
/// with other campaigns; everything crosses the boundary by value.
pub struct Campaign {
    scorer: Arc<Scorer>,
    pool: Arc<Vec<Module>>,
    category: Category,
    prioritized: Option<HashSet<String>>,
    params: SearchParams,
    rng: fastrand::Rng,
}

impl Campaign {
    pub fn new(
        scorer: Arc<Scorer>,
        pool: Arc<Vec<Module>>,
        category: Category,
        prioritized: Option<HashSet<String>>,
        params: SearchParams,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self {
            scorer,
            pool,
            category,
            prioritized,
            params,
            rng,
        }
    }

    /// Runs the full campaign and returns the final population sorted by
    /// score descending. A pool smaller than 4 yields an empty population.
    pub fn run(&mut self) -> Vec<Candidate> {
        let mut population = self.init_population();
        if population.is_empty() {
            return population;
        }

        for _ in 0..self.params.generations {
            population = self.next_generation(population);
        }

        population.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        population
    }

    /// Random distinct combinations until the target size is reached. The
    /// target caps at the number of distinct 4-subsets, so small pools
    /// exhaust instead of looping forever.
    fn init_population(&mut self) -> Vec<Candidate> {
        if self.pool.len() < 4 {
            return Vec::new();
        }
        let target = (self.params.population_size as u64)
            .min(combinations4(self.pool.len())) as usize;

        let mut population = Vec::with_capacity(target);
        let mut seen: HashSet<String> = HashSet::new();
        while population.len() < target {
            let Some(modules) = mutation::sample_combination(&self.pool, &mut self.rng) else {
                break;
            };
            let candidate = self.rescore(modules);
            if seen.insert(candidate.combo_key()) {
                population.push(candidate);
            }
        }
        population
    }

    fn next_generation(&mut self, mut population: Vec<Candidate>) -> Vec<Candidate> {
        population.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());

        let elite_count = ((population.len() as f64) * self.params.elite_fraction).round()
            as usize;
        let mut next: Vec<Candidate> = population[..elite_count.min(population.len())].to_vec();

        while next.len() < population.len() {
            let parent_a = self.tournament(&population);
            let parent_b = self.tournament(&population);

            let mut modules = if self.rng.f64() < self.params.crossover_rate {
                crossover::crossover_fill(&parent_a.modules, &parent_b.modules)
            } else {
                parent_a.modules.clone()
            };

            if self.rng.f64() < self.params.mutation_rate {
                mutation::mutate_slot(&mut modules, &self.pool, &mut self.rng);
            }

            next.push(self.rescore(modules));
        }

        for candidate in &mut next {
            candidate.score =
                self.scorer
                    .fitness(&candidate.modules, self.category, self.prioritized.as_ref());
        }

        next.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        let refine_count = ((next.len() as f64) * self.params.local_search_fraction).ceil()
            as usize;
        for candidate in next.iter_mut().take(refine_count) {
            *candidate = local_search(
                candidate,
                &self.pool,
                &self.scorer,
                self.category,
                self.prioritized.as_ref(),
            );
        }

        next
    }

    fn tournament<'a>(&mut self, population: &'a [Candidate]) -> &'a Candidate {
        let mut best = &population[self.rng.usize(0..population.len())];
        for _ in 1..self.params.tournament_size {
            let contender = &population[self.rng.usize(0..population.len())];
            if contender.score > best.score {
                best = contender;
            }
        }
        best
    }

    fn rescore(&self, modules: Vec<Module>) -> Candidate {
        Candidate::scored(modules, &self.scorer, self.category, self.prioritized.as_ref())
    }
}

/// Best-improvement local search: for each slot, evaluate every pool module as
/// a replacement and adopt the single best improving swap; repeat over all
/// slots until a full pass yields no improvement. Converges to a local
/// optimum rather than stopping at the first uphill move.
pub fn local_search(
    start: &Candidate,
    pool: &[Module],
    scorer: &Scorer,
    category: Category,
    prioritized: Option<&HashSet<String>>,
) -> Candidate {
    let mut best = start.clone();

    loop {
        let mut improved = false;

        for slot in 0..best.modules.len() {
            let mut best_swap: Option<Candidate> = None;

            for replacement in pool {
                if best.modules.iter().any(|m| m.uuid == replacement.uuid) {
                    continue;
                }
                let mut modules = best.modules.clone();
                modules[slot] = replacement.clone();
                let candidate = Candidate::scored(modules, scorer, category, prioritized);
                if candidate.score > best.score
                    && best_swap.as_ref().map_or(true, |s| candidate.score > s.score)
                {
                    best_swap = Some(candidate);
                }
            }

            if let Some(swap) = best_swap {
                best = swap;
                improved = true;
            }
        }

        if !improved {
            break;
        }
    }

    best
}
