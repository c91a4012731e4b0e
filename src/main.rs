use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use sysward::commands;
use sysward::{Engine, EngineConfig};

fn build_cli() -> Command {
    Command::new("sysward")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resource telemetry and cleanup engine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .help("Print the result as JSON")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("info").about("Show OS, CPU, memory, disk and public IP overview"))
        .subcommand(Command::new("scan").about("Scan every junk category"))
        .subcommand(
            Command::new("clean")
                .about("Delete the files of the given junk categories")
                .arg(
                    Arg::new("categories")
                        .help("Category ids (see 'sysward scan')")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Do not ask for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("optimize").about("Ask the OS to reclaim memory and report the difference"))
        .subcommand(
            Command::new("ps").about("List running processes").arg(
                Arg::new("top")
                    .long("top")
                    .value_name("N")
                    .help("Only show the N busiest processes")
                    .value_parser(clap::value_parser!(usize)),
            ),
        )
        .subcommand(
            Command::new("kill").about("Terminate a process").arg(
                Arg::new("pid")
                    .help("Process id")
                    .required(true)
                    .index(1)
                    .value_parser(clap::value_parser!(u32)),
            ),
        )
        .subcommand(Command::new("gpu").about("Show graphics adapters"))
        .subcommand(
            Command::new("history")
                .about("Show recorded usage history")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("clean").about("Junk cleaning history"))
                .subcommand(Command::new("net").about("Network traffic history"))
                .subcommand(Command::new("mem").about("Memory optimization history")),
        )
        .subcommand(Command::new("watch").about("Stream CPU, memory and network speed"))
        .subcommand(Command::new("net").about("Show network traffic and per-application usage"))
        .subcommand(Command::new("disks").about("List mounted volumes"))
        .subcommand(
            Command::new("large-files")
                .about("Find large files under a directory")
                .arg(Arg::new("root").help("Directory to scan").required(true).index(1))
                .arg(
                    Arg::new("min-mb")
                        .long("min-mb")
                        .value_name("MB")
                        .help("Minimum size in MB (default from config)")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                ),
        )
        .subcommand(Command::new("version").about("Show version information"))
        .subcommand(Command::new("check-update").about("Check GitHub for a newer release"))
}

/// Only the live views need the background sampler
fn needs_sampling(matches: &ArgMatches) -> bool {
    matches!(matches.subcommand_name(), Some("watch") | Some("net"))
}

fn main() -> Result<()> {
    sysward::init_logging();

    let matches = build_cli().get_matches();
    let json = matches.get_flag("json");

    let mut config = EngineConfig::load();
    config.background_sampling = config.background_sampling && needs_sampling(&matches);

    let engine = Engine::start(config).context("Failed to start engine")?;
    let outcome = dispatch(&engine, &matches, json);
    engine.shutdown();
    outcome
}

fn dispatch(engine: &Engine, matches: &ArgMatches, json: bool) -> Result<()> {
    match matches.subcommand() {
        Some(("info", _)) => commands::info::execute(engine, json),
        Some(("scan", _)) => commands::scan::execute(engine, json),
        Some(("clean", sub_matches)) => commands::clean::execute(engine, sub_matches, json),
        Some(("optimize", _)) => commands::optimize::execute(engine, json),
        Some(("ps", sub_matches)) => commands::process::execute_list(engine, sub_matches, json),
        Some(("kill", sub_matches)) => commands::process::execute_kill(engine, sub_matches, json),
        Some(("gpu", _)) => commands::info::execute_gpu(engine, json),
        Some(("history", sub_matches)) => commands::history::execute(engine, sub_matches, json),
        Some(("watch", _)) => commands::monitor::execute_watch(engine, json),
        Some(("net", _)) => commands::monitor::execute_net(engine, json),
        Some(("disks", _)) => commands::disks::execute_list(engine, json),
        Some(("large-files", sub_matches)) => commands::disks::execute_large_files(engine, sub_matches, json),
        Some(("version", _)) => commands::version::execute(engine, json),
        Some(("check-update", _)) => commands::version::execute_check_update(engine, json),
        _ => {
            println!("Use 'sysward --help' for more information.");
            Ok(())
        }
    }
}
