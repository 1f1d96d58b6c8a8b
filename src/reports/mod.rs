// ===== modforge/src/reports/mod.rs =====
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use modforge::module::Solution;
use modforge::scorer::Scorer;

pub fn print_ranking(solutions: &[Solution]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Combat Power").fg(Color::Cyan),
        Cell::new("Score"),
        Cell::new("Total Value"),
        Cell::new("Modules"),
    ]);

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, solution) in solutions.iter().enumerate() {
        let names: Vec<&str> = solution.modules.iter().map(|m| m.name.as_str()).collect();
        table.add_row(vec![
            Cell::new(format!("#{}", rank + 1)).add_attribute(Attribute::Bold),
            Cell::new(solution.combat_power.to_string()).fg(Color::Cyan),
            Cell::new(format!("{:.1}", solution.score)),
            Cell::new(solution.total_breakdown_value().to_string()),
            Cell::new(names.join(", ")),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_solution_details(solution: &Solution, rank: usize, scorer: &Scorer) {
    println!("\n=== Rank {} ===", rank);
    println!("Combat Power: {}", solution.combat_power);
    println!("Optimization Score: {:.1}", solution.score);
    println!("Total Attribute Value: {}", solution.total_breakdown_value());

    let mut modules = Table::new();
    modules.load_preset(ASCII_FULL);
    modules.add_row(vec![
        Cell::new("Module").add_attribute(Attribute::Bold),
        Cell::new("Quality"),
        Cell::new("UUID"),
        Cell::new("Parts"),
    ]);
    for module in &solution.modules {
        let parts: Vec<String> = module
            .parts
            .iter()
            .map(|p| format!("{} +{}", p.name, p.value))
            .collect();
        let uuid_short: String = module.uuid.chars().take(6).collect();
        modules.add_row(vec![
            Cell::new(&module.name),
            Cell::new(module.quality.to_string()),
            Cell::new(uuid_short),
            Cell::new(parts.join(", ")),
        ]);
    }
    println!("{}", modules);

    let mut breakdown = Table::new();
    breakdown.load_preset(ASCII_FULL);
    breakdown.add_row(vec![
        Cell::new("Attribute").add_attribute(Attribute::Bold),
        Cell::new("Value").set_alignment(CellAlignment::Right),
        Cell::new("Tier"),
    ]);
    for (name, &value) in &solution.attr_breakdown {
        let label = match scorer.met_threshold(value) {
            Some(threshold) => format!("T{} ({}pt)", scorer.tier(value), threshold),
            None => "-".to_string(),
        };
        let tier_cell = if scorer.tier(value) >= scorer.tables().thresholds.len() {
            Cell::new(label).fg(Color::Green)
        } else {
            Cell::new(label)
        };
        breakdown.add_row(vec![
            Cell::new(name),
            Cell::new(value.to_string()).set_alignment(CellAlignment::Right),
            tier_cell,
        ]);
    }
    println!("{}", breakdown);
}
