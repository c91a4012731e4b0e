use anyhow::{Context, Result};
use colored::Colorize;

use crate::commands::print_json;
use crate::Engine;

pub fn execute(engine: &Engine, json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({ "version": engine.app_version() }));
    }
    println!("sysward version {}", engine.app_version());
    Ok(())
}

pub fn execute_check_update(engine: &Engine, json: bool) -> Result<()> {
    let info = engine.check_update().context("Failed to check for updates")?;
    if json {
        return print_json(&info);
    }

    println!("{} {}", "Current version:".white().bold(), info.current_version);
    println!("{} {}", "Latest version: ".white().bold(), info.latest_version);

    if info.has_update {
        println!();
        println!("{}", "A new version is available.".green().bold());
        if !info.release_url.is_empty() {
            println!("{}", info.release_url.cyan());
        }
        if !info.release_notes.is_empty() {
            println!();
            println!("{}", info.release_notes.dimmed());
        }
    } else {
        println!("{}", "You are up to date.".green());
    }

    Ok(())
}
