//! Configuration file loading for the command-line front end.
//!
//! Settings live in a TOML file, `chess.toml` in the current directory by
//! default. Every key is optional and a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Front-end settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Print the board after every replayed move. Defaults to true.
    #[serde(default = "default_show_board")]
    pub show_board: bool,
    /// Log level when no `-v` flag is given. Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Depth used by `perft` when none is given. Defaults to 3.
    #[serde(default = "default_perft_depth")]
    pub perft_depth: u32,
}

fn default_show_board() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_perft_depth() -> u32 {
    3
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            show_board: default_show_board(),
            log_level: default_log_level(),
            perft_depth: default_perft_depth(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration from `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}
