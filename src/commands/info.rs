use anyhow::Result;
use colored::Colorize;

use crate::commands::{print_json, rule};
use crate::ui::{format_percent, format_size, usage_bar};
use crate::Engine;

pub fn execute(engine: &Engine, json: bool) -> Result<()> {
    let info = engine.get_system_info();
    if json {
        return print_json(&info);
    }

    println!("{}", "System Overview".white().bold());
    println!("{}", rule());
    println!("{:<12} {}", "OS:".white().bold(), info.os);
    println!("{:<12} {}", "Hostname:".white().bold(), info.hostname);
    println!(
        "{:<12} {} {}",
        "CPU:".white().bold(),
        usage_bar(info.cpu_usage, 20),
        format_percent(info.cpu_usage)
    );
    println!(
        "{:<12} {} {} ({} / {})",
        "Memory:".white().bold(),
        usage_bar(info.mem_percent, 20),
        format_percent(info.mem_percent),
        format_size(info.mem_used),
        format_size(info.mem_total)
    );
    println!(
        "{:<12} {} {} ({} / {})",
        "Disk:".white().bold(),
        usage_bar(info.disk_percent, 20),
        format_percent(info.disk_percent),
        format_size(info.disk_used),
        format_size(info.disk_total)
    );

    if info.public_ip.is_empty() {
        println!("{:<12} {}", "Public IP:".white().bold(), "unavailable".dimmed());
    } else {
        println!("{:<12} {}", "Public IP:".white().bold(), info.public_ip.cyan());
        println!("{:<12} {}", "Location:".white().bold(), info.ip_location);
        println!("{:<12} {}", "ISP:".white().bold(), info.ip_operator);
    }

    Ok(())
}

pub fn execute_gpu(engine: &Engine, json: bool) -> Result<()> {
    let result = engine.get_gpu_info();
    if json {
        return print_json(&result);
    }

    if result.gpus.is_empty() {
        println!("{}", "No graphics adapters detected.".yellow());
        return Ok(());
    }

    for (idx, gpu) in result.gpus.iter().enumerate() {
        println!("{} {}", format!("GPU {}:", idx).white().bold(), gpu.name.cyan().bold());
        println!("  {:<10} {}", "Type:", gpu.type_label);
        if gpu.vram > 0 {
            println!("  {:<10} {}", "VRAM:", format_size(gpu.vram));
        }
        if !gpu.driver_ver.is_empty() {
            println!("  {:<10} {}", "Driver:", gpu.driver_ver);
        }
        if !gpu.resolution.is_empty() {
            println!("  {:<10} {}", "Display:", gpu.resolution);
        }
    }

    Ok(())
}
