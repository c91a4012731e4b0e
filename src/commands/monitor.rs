//! Live sampling output: the `watch` stream and the `net` overview.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::commands::{print_json, rule};
use crate::ui::{format_percent, format_size, format_speed, truncate, usage_bar};
use crate::Engine;

/// Print realtime stats once per sample interval until Ctrl+C
pub fn execute_watch(engine: &Engine, json: bool) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::Relaxed);
    })
    .context("Failed to set Ctrl+C handler")?;

    let period = Duration::from_millis(engine.config().sample_interval_ms.max(100));

    if !json {
        println!("{}", "Press Ctrl+C to stop".dimmed());
    }

    while running.load(Ordering::Relaxed) {
        let stats = engine.get_realtime_stats();
        if json {
            println!("{}", serde_json::to_string(&stats).context("Failed to serialize output")?);
        } else {
            println!(
                "CPU {} {}  MEM {} {}  {} {}  {} {}",
                usage_bar(stats.cpu_percent, 10),
                format_percent(stats.cpu_percent),
                usage_bar(stats.mem_percent, 10),
                format_percent(stats.mem_percent),
                "up".green(),
                format_speed(stats.net_up_speed),
                "down".cyan(),
                format_speed(stats.net_down_speed)
            );
        }
        std::thread::sleep(period);
    }

    Ok(())
}

/// Traffic overview plus per-application breakdown
pub fn execute_net(engine: &Engine, json: bool) -> Result<()> {
    // Speeds need two samples from the background sampler
    if engine.snapshot().is_some() {
        let period = Duration::from_millis(engine.config().sample_interval_ms.max(100));
        std::thread::sleep(period * 2);
    }

    let traffic = engine.get_net_traffic();
    if json {
        return print_json(&traffic);
    }

    let overview = traffic.overview;
    println!("{}", "Network".white().bold());
    println!("{}", rule());
    println!(
        "{:<10} {}  ({} total)",
        "Upload:".white().bold(),
        format_speed(overview.up_speed).green(),
        format_size(overview.total_sent)
    );
    println!(
        "{:<10} {}  ({} total)",
        "Download:".white().bold(),
        format_speed(overview.down_speed).cyan(),
        format_size(overview.total_recv)
    );

    if traffic.processes.is_empty() {
        return Ok(());
    }

    println!();
    println!(
        "{:<24} {:>5} {:>12} {:>12}",
        "Application".white().bold(),
        "Procs".white().bold(),
        "Written".white().bold(),
        "Read".white().bold()
    );
    for app in &traffic.processes {
        println!(
            "{:<24} {:>5} {:>12} {:>12}",
            truncate(&app.name, 24),
            app.count,
            format_size(app.sent),
            format_size(app.recv)
        );
    }

    Ok(())
}
