#![forbid(unsafe_code)]

mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use crate::commands::Command;
use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};

/// Build, edit, and inspect BWOCB voxel grid files.
#[derive(Parser, Debug)]
#[command(name = "blockwork", version, about)]
struct Cli {
    /// Settings file; a missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Mirror log output into this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// -v for debug, -vv for trace.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.log_file.as_deref(), cli.verbose) {
        eprintln!("logger init failed: {}", e);
        return ExitCode::FAILURE;
    }
    let cfg = match AppConfig::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    match commands::run(cli.command, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
