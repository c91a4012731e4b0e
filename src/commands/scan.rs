use anyhow::Result;
use colored::Colorize;

use crate::commands::{print_json, rule};
use crate::ui::format_size;
use crate::Engine;

pub fn execute(engine: &Engine, json: bool) -> Result<()> {
    if !json {
        println!("{}", "Scanning for junk files...".dimmed());
    }

    let results = engine.scan_junk();
    if json {
        return print_json(&results);
    }

    println!();
    println!("{:<18} {:<28} {:>8} {:>10}", "ID".white().bold(), "Category".white().bold(), "Files".white().bold(), "Size".white().bold());
    println!("{}", rule());

    let mut total_size = 0u64;
    let mut total_count = 0usize;
    for result in &results {
        total_size += result.size;
        total_count += result.count;

        let size = format_size(result.size);
        let size = if result.size > 0 { size.yellow() } else { size.dimmed() };
        println!(
            "{:<18} {:<28} {:>8} {:>10}",
            result.category.id().cyan(),
            result.label,
            result.count,
            size
        );
    }

    println!("{}", rule());
    println!(
        "{} {} files ({})",
        "Total:".white().bold(),
        total_count.to_string().yellow().bold(),
        format_size(total_size).yellow().bold()
    );
    println!();
    println!("{}", "Run 'sysward clean <id>...' to delete a category.".dimmed());

    Ok(())
}
