use anyhow::Result;
use colored::Colorize;

use crate::commands::print_json;
use crate::ui::{format_mb, format_percent, format_size};
use crate::Engine;

pub fn execute(engine: &Engine, json: bool) -> Result<()> {
    if !json {
        println!("{}", "Reclaiming memory...".cyan().bold());
    }

    let result = engine.optimize_memory()?;
    if json {
        return print_json(&result);
    }

    println!(
        "{:<8} {} ({})",
        "Before:".white().bold(),
        format_size(result.before_used),
        format_percent(result.before_percent)
    );
    println!(
        "{:<8} {} ({})",
        "After:".white().bold(),
        format_size(result.after_used),
        format_percent(result.after_percent)
    );

    if result.freed_mb > 0.0 {
        println!("{} {}", "Freed:".green().bold(), format_mb(result.freed_mb).yellow().bold());
    } else {
        println!("{}", "No memory was released.".dimmed());
    }

    Ok(())
}
