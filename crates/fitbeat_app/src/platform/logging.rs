//! Platform logging initialization for fitbeat_app.
//!
//! Always logs to the terminal; optionally also to `./fitbeat.log` in the
//! current working directory.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

const LOG_FILENAME: &str = "./fitbeat.log";

pub(crate) fn initialize(log_to_file: bool) {
    let level = LevelFilter::Info;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_to_file {
        match File::create(LOG_FILENAME) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => {
                eprintln!("Warning: could not create log file at {LOG_FILENAME}: {err}");
            }
        }
    }

    let _ = CombinedLogger::init(loggers);
}
