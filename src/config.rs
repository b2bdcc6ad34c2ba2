// Command-line and environment configuration.
// Resolves the API base URL, cache location, and log level.

use std::path::PathBuf;

use clap::Parser;

use crate::api::client::DEFAULT_BASE_URL;
use crate::cache::paths;
use crate::error::{BoardError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "kickstart",
    about = "Search internship postings by country, state, and discipline",
    version
)]
pub struct Cli {
    /// Base URL of the job board API.
    #[arg(long, env = "KICKSTART_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory for cached responses and the log file.
    #[arg(long, env = "KICKSTART_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub cache_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Resolve configuration from parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let cache_dir = match cli.cache_dir {
            Some(dir) => dir,
            None => paths::cache_dir().ok_or(BoardError::NoCacheDir)?,
        };

        Ok(Self {
            base_url: cli.base_url,
            cache_dir,
            log_level: cli.log_level,
        })
    }
}
