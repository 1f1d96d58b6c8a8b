// ===== modforge/benches/scoring_bench.rs =====
use criterion::{criterion_group, criterion_main, Criterion};
use modforge::config::ScoringTables;
use modforge::module::{Category, Module, ModulePart};
use modforge::scorer::Scorer;
use std::hint::black_box;

const ATTRS: [&str; 6] = [
    "Strength Boost",
    "Agility Boost",
    "Intelligence Boost",
    "Special Attack Damage",
    "Critical Focus",
    "Luck Focus",
];

fn setup_modules() -> Vec<Module> {
    (0..4)
        .map(|i| Module {
            uuid: format!("bench-{}", i),
            name: format!("Module {}", i),
            config_id: 5500101,
            quality: 5,
            parts: (0..3)
                .map(|p| ModulePart {
                    id: 1110 + p,
                    name: ATTRS[((i + p as usize) % ATTRS.len())].to_string(),
                    value: 3 + (i as u32 * 2 + p) % 8,
                })
                .collect(),
        })
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = Scorer::new(ScoringTables::default()).unwrap();
    let modules = setup_modules();

    c.bench_function("combat_power", |b| {
        b.iter(|| scorer.combat_power(black_box(&modules)))
    });

    c.bench_function("fitness", |b| {
        b.iter(|| scorer.fitness(black_box(&modules), Category::Attack, None))
    });
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
