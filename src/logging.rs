use std::error::Error;
use std::fs::File;
use std::path::Path;

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger. With a log file, output goes to both the
/// terminal and the file; otherwise `RUST_LOG` can refine the level.
pub fn init(log_file: Option<&Path>, verbose: u8) -> Result<(), Box<dyn Error>> {
    let level = level_for(verbose);
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let config = ConfigBuilder::new().set_target_level(LevelFilter::Error).build();
            CombinedLogger::init(vec![
                TermLogger::new(level, config.clone(), TerminalMode::Stderr, ColorChoice::Auto),
                WriteLogger::new(level, config, file),
            ])?;
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_env("RUST_LOG")
                .init();
        }
    }
    Ok(())
}
