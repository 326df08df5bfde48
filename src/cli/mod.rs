//! CLI module for the nutrition insights service
//!
//! Provides subcommands:
//! - `serve`: HTTP API with optional start-up processing and source polling
//! - `process`: run the processing pipeline once against a CSV file

pub mod process;
pub mod serve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Nutrition Insights - recipe statistics served from a cache
#[derive(Parser)]
#[command(name = "nutrition-insights")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Process a recipe CSV once and store the results in the cache
    Process {
        /// CSV file to process; defaults to `data.csv_path`
        file: Option<PathBuf>,
    },
}

/// Loads `.env`, the layered configuration and the log subscriber
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init_logging(&config.logging).context("failed to initialize logging")?;

    Ok(config)
}
