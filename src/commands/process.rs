use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::commands::print_json;
use crate::error::SyswardError;
use crate::ui::{format_size, truncate};
use crate::Engine;

pub fn execute_list(engine: &Engine, matches: &ArgMatches, json: bool) -> Result<()> {
    let top = matches.get_one::<usize>("top").copied();

    let mut processes = engine.get_process_list();
    if let Some(top) = top {
        processes.truncate(top);
    }

    if json {
        return print_json(&processes);
    }

    println!(
        "{:>7}  {:<24} {:>7} {:>10} {:>6}  {:<10} {}",
        "PID".white().bold(),
        "Name".white().bold(),
        "CPU%".white().bold(),
        "RSS".white().bold(),
        "MEM%".white().bold(),
        "Status".white().bold(),
        "User".white().bold()
    );
    for proc in &processes {
        println!(
            "{:>7}  {:<24} {:>7.1} {:>10} {:>6.1}  {:<10} {}",
            proc.pid,
            truncate(&proc.name, 24),
            proc.cpu_percent,
            format_size(proc.mem_rss),
            proc.mem_percent,
            proc.status,
            proc.username.dimmed()
        );
    }

    Ok(())
}

pub fn execute_kill(engine: &Engine, matches: &ArgMatches, json: bool) -> Result<()> {
    let pid = *matches.get_one::<u32>("pid").context("PID is required")?;

    match engine.kill_process(pid) {
        Ok(()) => {
            if json {
                print_json(&serde_json::json!({ "pid": pid, "killed": true }))
            } else {
                println!("{} process {}", "Terminated".green().bold(), pid);
                Ok(())
            }
        }
        Err(SyswardError::PermissionDenied(msg)) => {
            Err(anyhow::anyhow!("{} (try running with elevated privileges)", msg))
        }
        Err(e) => Err(e.into()),
    }
}
