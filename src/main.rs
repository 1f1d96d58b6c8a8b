// ===== modforge/src/main.rs =====
use clap::{Parser, Subcommand};
use modforge::config::{Catalog, Config, ScoringTables};
use std::path::Path;
use std::process;
use tracing::{error, info, warn};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scoring tables JSON (thresholds, power tables, bonus table).
    #[arg(global = true, long, default_value = "data/scoring_tables.json")]
    tables: String,

    /// Catalog JSON (module names, attribute names, category map).
    #[arg(global = true, long, default_value = "data/catalog.json")]
    catalog: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Optimize(cmd::optimize::OptimizeArgs),
    Score(cmd::score::ScoreArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    info!("🚀 Initializing ModForge...");

    let tables = if Path::new(&cli.tables).exists() {
        info!("⚖️  Loading scoring tables from: {}", cli.tables);
        ScoringTables::load_from_file(&cli.tables).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        })
    } else {
        warn!(
            "scoring tables file '{}' not found; using embedded defaults",
            cli.tables
        );
        ScoringTables::default()
    };

    let catalog = if Path::new(&cli.catalog).exists() {
        info!("📖 Loading catalog from: {}", cli.catalog);
        Catalog::load_from_file(&cli.catalog).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        })
    } else {
        warn!(
            "catalog file '{}' not found; using embedded defaults",
            cli.catalog
        );
        Catalog::default()
    };

    let config = Config {
        search: Default::default(),
        tables,
        catalog,
    };

    match cli.command {
        Commands::Optimize(args) => cmd::optimize::run(args, config),
        Commands::Score(args) => cmd::score::run(args, config),
    }
}
