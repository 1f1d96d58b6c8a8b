mod common;

use common::{default_scorer, fast_config, fast_params, module};
use modforge::api::optimize_modules;
use modforge::module::{combo_key, Category, Module};
use modforge::optimizer::crossover::crossover_fill;
use modforge::optimizer::mutation::mutate_slot;
use modforge::optimizer::{combinations4, Campaign};
use std::collections::HashSet;
use std::sync::Arc;

fn quad(prefix: &str) -> Vec<Module> {
    vec![
        module(&format!("{prefix}-a"), &[("Strength Boost", 6), ("Critical Focus", 6)]),
        module(&format!("{prefix}-b"), &[("Strength Boost", 6), ("Luck Focus", 6)]),
        module(&format!("{prefix}-c"), &[("Strength Boost", 4), ("Critical Focus", 8)]),
        module(&format!("{prefix}-d"), &[("Strength Boost", 4), ("Luck Focus", 8)]),
    ]
}

#[test]
fn campaign_on_tiny_pool_is_empty() {
    let pool: Vec<Module> = quad("q").into_iter().take(3).collect();
    let mut campaign = Campaign::new(
        Arc::new(default_scorer()),
        Arc::new(pool),
        Category::All,
        None,
        fast_params(1),
        Some(1),
    );
    assert!(campaign.run().is_empty());
}

#[test]
fn campaign_population_caps_at_distinct_subsets() {
    assert_eq!(combinations4(4), 1);
    assert_eq!(combinations4(6), 15);

    let mut campaign = Campaign::new(
        Arc::new(default_scorer()),
        Arc::new(quad("q")),
        Category::All,
        None,
        fast_params(2),
        Some(2),
    );
    let population = campaign.run();
    assert_eq!(population.len(), 1);
}

#[test]
fn exact_pool_returns_the_only_combination() {
    let pool = quad("only");
    let config = fast_config(42);

    let solutions = optimize_modules(&config, &pool, Category::All, 5, None, &|_: &str| {});
    assert_eq!(solutions.len(), 1);

    let solution = &solutions[0];
    assert_eq!(solution.combo_key(), combo_key(&pool));

    let scorer = default_scorer();
    let (expected_power, _) = scorer.combat_power(&pool);
    assert_eq!(solution.combat_power, expected_power);
}

#[test]
fn results_are_ranked_and_unique() {
    // Six single-attribute modules, all below the quality floor: exercises the
    // low-quality fallback and gives every 4-subset a distinct tier sum.
    let values = [10, 8, 6, 4, 2, 1];
    let pool: Vec<Module> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| module(&format!("m{}", i), &[("Strength Boost", v)]))
        .collect();

    let config = fast_config(7);
    let solutions = optimize_modules(&config, &pool, Category::All, 3, None, &|_: &str| {});

    assert!(!solutions.is_empty());
    assert!(solutions.len() <= 3);

    let mut keys = HashSet::new();
    for solution in &solutions {
        assert_eq!(solution.modules.len(), 4);
        let distinct: HashSet<&str> =
            solution.modules.iter().map(|m| m.uuid.as_str()).collect();
        assert_eq!(distinct.len(), 4);
        assert!(keys.insert(solution.combo_key()));
    }
    for pair in solutions.windows(2) {
        assert!(pair[0].combat_power > pair[1].combat_power);
    }
}

#[test]
fn solutions_always_have_four_distinct_members() {
    let pool: Vec<Module> = (0..10)
        .map(|i| {
            module(
                &format!("m{}", i),
                &[("Strength Boost", 3 + i as u32), ("Critical Focus", 2 + i as u32)],
            )
        })
        .collect();

    let config = fast_config(11);
    let solutions = optimize_modules(&config, &pool, Category::All, 10, None, &|_: &str| {});
    assert!(!solutions.is_empty());
    for solution in &solutions {
        let distinct: HashSet<&str> =
            solution.modules.iter().map(|m| m.uuid.as_str()).collect();
        assert_eq!(distinct.len(), 4);
    }
}

#[test]
fn narrow_priority_intersection_yields_empty_result() {
    let pool = quad("p");
    let config = fast_config(3);
    let priority = vec!["Strength Boost".to_string(), "Magic Resistance".to_string()];

    // Only one prioritized attribute exists in the pool; the search is
    // abandoned early instead of erroring.
    let solutions =
        optimize_modules(&config, &pool, Category::All, 5, Some(&priority), &|_: &str| {});
    assert!(solutions.is_empty());
}

#[test]
fn undersized_category_pool_yields_empty_result() {
    let pool: Vec<Module> = quad("u").into_iter().take(3).collect();
    let config = fast_config(5);
    let solutions = optimize_modules(&config, &pool, Category::All, 5, None, &|_: &str| {});
    assert!(solutions.is_empty());
}

#[test]
fn crossover_keeps_parent_a_prefix_and_fills_from_b() {
    let a = {
        let mut m = quad("a");
        m.sort_by(|x, y| x.uuid.cmp(&y.uuid));
        m
    };
    let b = {
        let mut m = quad("b");
        m.sort_by(|x, y| x.uuid.cmp(&y.uuid));
        m
    };

    let child = crossover_fill(&a, &b);
    assert_eq!(child.len(), 4);
    assert_eq!(child[0].uuid, a[0].uuid);
    assert_eq!(child[1].uuid, a[1].uuid);
    assert!(child[2..].iter().all(|m| m.uuid.starts_with("b-")));
}

#[test]
fn crossover_degrades_to_parent_copy() {
    let a = quad("same");
    // Identical parents cannot contribute new members beyond A itself.
    let child = crossover_fill(&a, &a);
    let uuids: HashSet<&str> = child.iter().map(|m| m.uuid.as_str()).collect();
    assert_eq!(uuids.len(), 4);
    assert_eq!(combo_key(&child), combo_key(&a));
}

#[test]
fn mutation_is_a_no_op_without_replacements() {
    let pool = quad("m");
    let mut members = pool.clone();
    let before = combo_key(&members);

    let mut rng = fastrand::Rng::with_seed(9);
    mutate_slot(&mut members, &pool, &mut rng);
    assert_eq!(combo_key(&members), before);
}

#[test]
fn mutation_swaps_in_a_non_member() {
    let mut pool = quad("m");
    pool.push(module("extra", &[("Strength Boost", 9)]));

    let mut members: Vec<Module> = pool[..4].to_vec();
    let mut rng = fastrand::Rng::with_seed(9);
    mutate_slot(&mut members, &pool, &mut rng);

    let distinct: HashSet<&str> = members.iter().map(|m| m.uuid.as_str()).collect();
    assert_eq!(distinct.len(), 4);
    assert!(members.iter().any(|m| m.uuid == "extra"));
}
