use crate::reports;
use clap::Args;
use modforge::api;
use modforge::config::{Config, SearchParams};
use modforge::module::Category;
use modforge::parser;
use modforge::scorer::Scorer;
use std::process;
use std::str::FromStr;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub search: SearchParams,

    /// Inventory file with decoded module records (.json or .csv).
    #[arg(short, long, default_value = "data/modules.json")]
    pub inventory: String,

    /// Target category: attack, guardian, support or all.
    #[arg(short, long, default_value = "attack")]
    pub category: String,

    /// Keep only combinations built from these attributes (repeatable).
    #[arg(short = 'a', long = "attr")]
    pub attrs: Vec<String>,

    #[arg(short = 't', long, default_value_t = 10)]
    pub top: usize,

    /// Print the full per-solution breakdown tables.
    #[arg(long, default_value_t = false)]
    pub details: bool,
}

pub fn run(args: OptimizeArgs, mut config: Config) {
    config.search = args.search.clone();

    let category = Category::from_str(&args.category).unwrap_or_else(|_| {
        error!("unknown category '{}'", args.category);
        process::exit(1);
    });

    info!("📦 Loading inventory: {}", args.inventory);
    let raws = parser::load_inventory(&args.inventory).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    let pool = parser::decode_modules(&raws, &config.catalog);

    let prioritized = if args.attrs.is_empty() {
        None
    } else {
        Some(args.attrs.as_slice())
    };

    let solutions = api::optimize_modules(
        &config,
        &pool,
        category,
        args.top,
        prioritized,
        &|status: &str| info!("{}", status),
    );

    if solutions.is_empty() {
        info!("no viable combination found for category {}", category);
        return;
    }

    reports::print_ranking(&solutions);

    if args.details {
        let scorer = match Scorer::new(config.tables.clone()) {
            Ok(s) => s,
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        };
        for (i, solution) in solutions.iter().enumerate() {
            reports::print_solution_details(solution, i + 1, &scorer);
        }
    }
}
