use crate::reports;
use clap::Args;
use modforge::config::Config;
use modforge::module::Solution;
use modforge::parser;
use modforge::scorer::Scorer;
use std::process;
use tracing::error;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Inventory file with decoded module records (.json or .csv).
    #[arg(short, long, default_value = "data/modules.json")]
    pub inventory: String,

    /// Exactly four module uuids to score as a combination.
    #[arg(required = true, num_args = 4)]
    pub uuids: Vec<String>,
}

pub fn run(args: ScoreArgs, config: Config) {
    let raws = parser::load_inventory(&args.inventory).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    let pool = parser::decode_modules(&raws, &config.catalog);

    let mut modules = Vec::with_capacity(4);
    for uuid in &args.uuids {
        match pool.iter().find(|m| &m.uuid == uuid) {
            Some(module) => modules.push(module.clone()),
            None => {
                error!("uuid '{}' not found in inventory", uuid);
                process::exit(1);
            }
        }
    }
    modules.sort_by(|a, b| a.uuid.cmp(&b.uuid));
    modules.dedup_by(|a, b| a.uuid == b.uuid);
    if modules.len() < 4 {
        error!("the four uuids must be distinct");
        process::exit(1);
    }

    let scorer = match Scorer::new(config.tables.clone()) {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let category = config.catalog.category_of(modules[0].config_id);
    let score = scorer.fitness(&modules, category, None);
    let (combat_power, attr_breakdown) = scorer.combat_power(&modules);
    let solution = Solution {
        modules,
        attr_breakdown,
        combat_power,
        score,
    };

    reports::print_solution_details(&solution, 1, &scorer);
}
