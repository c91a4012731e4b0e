use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use dialoguer::Confirm;

use crate::commands::{print_json, rule};
use crate::core::junk::JunkCategory;
use crate::platform::is_elevated;
use crate::ui::{clear_line, format_size, show_progress_bar};
use crate::Engine;

pub fn execute(engine: &Engine, matches: &ArgMatches, json: bool) -> Result<()> {
    let ids: Vec<String> = matches
        .get_many::<String>("categories")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let assume_yes = matches.get_flag("yes");

    let known: Vec<JunkCategory> = ids.iter().filter_map(|id| JunkCategory::from_id(id)).collect();
    if known.is_empty() {
        println!("{}", "No known category selected. Valid ids:".yellow());
        for category in JunkCategory::ALL {
            println!("  {:<18} {}", category.id().cyan(), category.label());
        }
        return Ok(());
    }

    if !assume_yes {
        println!("{}", "Categories to clean:".white().bold());
        for category in &known {
            println!("  - {}", category.label().cyan());
        }
        if !is_elevated() {
            println!("{}", "Note: some system locations need elevated privileges.".yellow());
        }
        println!();

        let proceed = Confirm::new()
            .with_prompt("Delete these files?")
            .default(false)
            .interact()?;

        if !proceed {
            println!("{}", "Operation cancelled by user.".yellow());
            return Ok(());
        }
    }

    let cancel = engine.clean_cancel_token();
    ctrlc::set_handler(move || {
        println!();
        println!("{}", "Cancellation requested, stopping after the current file...".yellow().bold());
        cancel.cancel();
    })
    .context("Failed to set Ctrl+C handler")?;

    let result = engine.clean_junk_with_progress(&ids, |processed, total| {
        if !json {
            show_progress_bar(processed, total, "Cleaning:");
        }
    })?;

    if json {
        return print_json(&result);
    }

    clear_line();
    println!("{}", rule());
    println!("{}", "Cleanup Summary".white().bold());
    println!("{}", rule());
    println!("{} {}", "Deleted:".green().bold(), format!("{} files", result.cleaned_count).yellow().bold());
    println!("{} {}", "Space recovered:".green().bold(), format_size(result.freed_size).yellow().bold());
    if result.failed_count > 0 {
        println!(
            "{} {} (in use or protected)",
            "Failed:".red().bold(),
            format!("{} files", result.failed_count).red()
        );
    }

    Ok(())
}
