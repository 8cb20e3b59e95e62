//! Logger setup.
//!
//! An explicit `-v` logs to stderr at the chosen level. Otherwise
//! `log4rs.yml` from the working directory is used when present, falling back
//! to stderr at warn. Stdout is left for results.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

const STDERR_PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Map `-v` occurrences to a level: warn, info, debug, trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Where log configuration comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogSource {
    File,
    Stderr(LevelFilter),
}

/// `-v` wins over the config file.
pub fn log_source(verbosity: u8, config_file_exists: bool) -> LogSource {
    if verbosity == 0 && config_file_exists {
        LogSource::File
    } else {
        LogSource::Stderr(level_for(verbosity))
    }
}

pub fn init(verbosity: u8) -> Result<(), Box<dyn Error>> {
    match log_source(verbosity, Path::new(LOG_CONFIG_FILE).exists()) {
        LogSource::File => {
            log4rs::init_file(LOG_CONFIG_FILE, Default::default())?;
            log::debug!("logging configured from {LOG_CONFIG_FILE}");
        }
        LogSource::Stderr(level) => {
            log4rs::init_config(stderr_config(level)?)?;
        }
    }
    Ok(())
}

fn stderr_config(level: LevelFilter) -> Result<LogConfig, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(STDERR_PATTERN)))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}
