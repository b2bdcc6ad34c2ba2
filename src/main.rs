// kickstart: search internship postings from the terminal.
// Parses arguments, sets up file logging, and runs the TUI.

mod api;
mod app;
mod browser;
mod cache;
mod config;
mod error;
mod state;
mod ui;

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::ApiClient;
use crate::app::App;
use crate::cache::{CacheStore, paths};
use crate::config::{Cli, Config};
use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    init_logging(&config)?;

    info!(base_url = %config.base_url, cache_dir = %config.cache_dir.display(), "starting");

    let api = ApiClient::new(&config.base_url)?;
    let cache = CacheStore::new(config.cache_dir.clone());
    match cache.keys() {
        Ok(keys) => info!(entries = keys.len(), "cache opened"),
        Err(e) => warn!(error = %e, "cache directory is not readable"),
    }
    let mut app = App::new(api, cache);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    info!("exiting");
    Ok(())
}

/// Send tracing output to a log file; the terminal belongs to the TUI.
fn init_logging(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.cache_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::log_path(&config.cache_dir))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
