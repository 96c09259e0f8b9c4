//! Console output helpers shared by the commands.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use orgweave::GraphStatistics;

/// Create a formatted table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

pub fn print_success(message: &str) {
    println!("{} {message}", "OK".bright_green().bold());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {message}", "WARN".yellow().bold());
}

/// Render graph statistics as the standard inspect table.
pub fn print_statistics(stats: &GraphStatistics) {
    let mut table = create_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Entities".to_string(), stats.entity_count.to_string()]);
    table.add_row(vec![
        "Relationships".to_string(),
        stats.relationship_count.to_string(),
    ]);
    table.add_row(vec!["Density".to_string(), format!("{:.4}", stats.density)]);
    table.add_row(vec![
        "Weakly connected".to_string(),
        stats.is_weakly_connected.to_string(),
    ]);
    table.add_row(vec![
        "Components".to_string(),
        stats.weakly_connected_components.to_string(),
    ]);
    println!("{table}");

    if !stats.entities_by_type.is_empty() {
        let mut by_type = create_table();
        by_type.set_header(vec!["Entity type", "Count"]);
        for (kind, count) in &stats.entities_by_type {
            by_type.add_row(vec![kind.clone(), count.to_string()]);
        }
        println!("{by_type}");
    }
}

/// Format a duration the way the benchmark table wants it.
pub fn format_duration(duration: std::time::Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1_000 {
        format!("{millis}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
