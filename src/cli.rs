//! Command-line interface parsing for the staff directory viewer
//!
//! This module handles parsing of CLI arguments using clap, including
//! overrides for the directory endpoint and cache freshness window, and the
//! --plain flag for non-interactive output.

use clap::Parser;

use crate::data::directory::{DIRECTORY_URL, FRESHNESS_SECS};

/// Staff Directory CLI - View a company employee directory
#[derive(Parser, Debug)]
#[command(name = "staffdir")]
#[command(about = "Company employee directory viewer with cached fetches")]
#[command(version)]
pub struct Cli {
    /// Directory endpoint to fetch from instead of the built-in default
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Seconds a cached directory is served before refetching
    ///
    /// A value of 0 disables caching: every invocation hits the network.
    #[arg(long, value_name = "SECONDS")]
    pub ttl: Option<u64>,

    /// Print the sorted directory to stdout and exit instead of opening the TUI
    #[arg(long)]
    pub plain: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Endpoint the directory is fetched from
    pub endpoint: String,
    /// Cache freshness window in seconds
    pub freshness_secs: u64,
    /// Whether to print to stdout instead of running the TUI
    pub plain: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            endpoint: DIRECTORY_URL.to_string(),
            freshness_secs: FRESHNESS_SECS,
            plain: false,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let defaults = StartupConfig::default();
        Self {
            endpoint: cli.endpoint.clone().unwrap_or(defaults.endpoint),
            freshness_secs: cli.ttl.unwrap_or(defaults.freshness_secs),
            plain: cli.plain,
        }
    }
}
