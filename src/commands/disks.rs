use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::commands::print_json;
use crate::ui::{format_percent, format_size, usage_bar};
use crate::Engine;

pub fn execute_list(engine: &Engine, json: bool) -> Result<()> {
    let disks = engine.get_disk_list();
    if json {
        return print_json(&disks);
    }

    if disks.is_empty() {
        println!("{}", "No mounted volumes found.".yellow());
        return Ok(());
    }

    for disk in &disks {
        println!(
            "{} {} {}",
            disk.mountpoint.cyan().bold(),
            format!("({})", disk.device).dimmed(),
            disk.fstype.dimmed()
        );
        println!(
            "  {} {}  {} used, {} free of {}",
            usage_bar(disk.used_percent, 24),
            format_percent(disk.used_percent),
            format_size(disk.used),
            format_size(disk.free),
            format_size(disk.total)
        );
    }

    Ok(())
}

pub fn execute_large_files(engine: &Engine, matches: &ArgMatches, json: bool) -> Result<()> {
    let root = matches.get_one::<String>("root").context("Root path is required")?;
    let min_mb = matches.get_one::<i64>("min-mb").copied().unwrap_or(0);
    let root = PathBuf::from(root);

    if !json {
        println!("{} {}", "Scanning".cyan().bold(), root.display());
    }

    let result = engine.scan_large_files(&root, min_mb);
    if json {
        return print_json(&result);
    }

    if result.files.is_empty() {
        println!("{}", "No large files found.".green());
        return Ok(());
    }

    for file in &result.files {
        println!("{:>10}  {:<6} {}", format_size(file.size).yellow(), file.ext.dimmed(), file.path);
    }
    println!();
    println!("{} {} files", "Found:".white().bold(), result.count.to_string().yellow().bold());

    Ok(())
}
