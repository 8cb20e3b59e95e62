//! Runtime settings.
//!
//! Defaults can be set in the environment (or a `.env` file) and are
//! overridden by command-line flags.

use crate::output::OutputFormat;
use crate::processing::{Splitter, DEFAULT_MAX_SPLIT_BITS};
use std::error::Error;

/// Limit on the prefix difference of a single split.
pub const ENV_MAX_SPLIT_BITS: &str = "CHUNKCIDR_MAX_SPLIT_BITS";
/// Default output format, `plain` or `json`.
pub const ENV_FORMAT: &str = "CHUNKCIDR_FORMAT";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_split_bits: u32,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_split_bits: DEFAULT_MAX_SPLIT_BITS,
            format: OutputFormat::Plain,
        }
    }
}

impl Config {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_vars(|key| std::env::var(key).ok())
    }

    /// Read settings through `get`, falling back to defaults for unset keys.
    pub fn from_vars<F>(get: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(bits) = get(ENV_MAX_SPLIT_BITS) {
            config.max_split_bits = bits
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("{ENV_MAX_SPLIT_BITS}={bits}: {e}"))?;
            log::debug!("max_split_bits={} from environment", config.max_split_bits);
        }
        if let Some(format) = get(ENV_FORMAT) {
            config.format = format
                .parse::<OutputFormat>()
                .map_err(|e| format!("{ENV_FORMAT}={format}: {e}"))?;
        }

        Ok(config)
    }

    /// Apply flag values that were given.
    pub fn with_overrides(
        mut self,
        max_split_bits: Option<u32>,
        format: Option<OutputFormat>,
    ) -> Config {
        if let Some(bits) = max_split_bits {
            self.max_split_bits = bits;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    pub fn splitter(&self) -> Splitter {
        Splitter::new(self.max_split_bits)
    }
}
