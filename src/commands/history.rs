use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;

use crate::commands::{print_json, rule};
use crate::ui::{format_mb, format_size};
use crate::Engine;

pub fn execute(engine: &Engine, matches: &ArgMatches, json: bool) -> Result<()> {
    match matches.subcommand() {
        Some(("clean", _)) => show_clean(engine, json),
        Some(("net", _)) => show_net(engine, json),
        Some(("mem", _)) => show_mem(engine, json),
        _ => {
            println!("Use 'sysward history --help' for more information.");
            Ok(())
        }
    }
}

fn show_clean(engine: &Engine, json: bool) -> Result<()> {
    let stats = engine.get_clean_history()?;
    if json {
        return print_json(&stats);
    }

    println!("{}", "Clean History".white().bold());
    println!("{}", rule());
    println!("{:<14} {} ({})", "Last clean:".white().bold(), display_or_dash(&stats.last_clean_time), stats.last_clean_ago.cyan());
    println!("{:<14} {}", "Total freed:".white().bold(), format_size(stats.total_freed).yellow().bold());
    println!("{:<14} {} files", "Total cleaned:".white().bold(), stats.total_count);

    if !stats.daily_stats.is_empty() {
        println!();
        println!("{}", "Daily".white().bold());
        for day in &stats.daily_stats {
            println!("  {}  {:>10}  {:>6} files", day.date, format_size(day.freed_size), day.count);
        }
    }

    if !stats.monthly_stats.is_empty() {
        println!();
        println!("{}", "Monthly".white().bold());
        for month in &stats.monthly_stats {
            println!("  {}     {:>10}  {:>6} files", month.month, format_size(month.freed_size), month.count);
        }
    }

    Ok(())
}

fn show_mem(engine: &Engine, json: bool) -> Result<()> {
    let stats = engine.get_mem_opt_stats()?;
    if json {
        return print_json(&stats);
    }

    println!("{}", "Memory Optimization History".white().bold());
    println!("{}", rule());
    println!("{:<14} {} ({})", "Last run:".white().bold(), display_or_dash(&stats.last_opt_time), stats.last_opt_ago.cyan());
    println!("{:<14} {}", "Total freed:".white().bold(), format_mb(stats.total_freed_mb).yellow().bold());
    println!("{:<14} {}", "Runs:".white().bold(), stats.total_count);

    if !stats.recent_records.is_empty() {
        println!();
        println!("{}", "Recent".white().bold());
        for record in &stats.recent_records {
            println!(
                "  {} {}  {:>9}  {:.1}% -> {:.1}%",
                record.date,
                record.time,
                format_mb(record.freed_mb),
                record.before_percent,
                record.after_percent
            );
        }
    }

    if !stats.daily_stats.is_empty() {
        println!();
        println!("{}", "Daily".white().bold());
        for day in &stats.daily_stats {
            println!("  {}  {:>9}  {:>4} runs", day.date, format_mb(day.freed_mb), day.count);
        }
    }

    Ok(())
}

fn show_net(engine: &Engine, json: bool) -> Result<()> {
    let stats = engine.get_net_traffic_stats()?;
    if json {
        return print_json(&stats);
    }

    println!("{}", "Network Traffic History".white().bold());
    println!("{}", rule());
    println!(
        "{:<8} {} sent, {} received",
        "Total:".white().bold(),
        format_size(stats.total_sent).yellow(),
        format_size(stats.total_recv).yellow()
    );

    let sections: [(&str, Vec<(&str, u64, u64)>); 3] = [
        ("Daily", stats.daily_stats.iter().map(|s| (s.date.as_str(), s.sent, s.recv)).collect()),
        ("Monthly", stats.monthly_stats.iter().map(|s| (s.month.as_str(), s.sent, s.recv)).collect()),
        ("Yearly", stats.yearly_stats.iter().map(|s| (s.year.as_str(), s.sent, s.recv)).collect()),
    ];

    for (title, rows) in sections.iter() {
        if rows.is_empty() {
            continue;
        }
        println!();
        println!("{}", title.white().bold());
        for (key, sent, recv) in rows {
            println!("  {:<10}  up {:>10}  down {:>10}", key, format_size(*sent), format_size(*recv));
        }
    }

    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
