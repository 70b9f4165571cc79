//! CLI arguments

use crate::config::{
    DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_PATH, DEFAULT_PAGE_SIZE, DEFAULT_SITE,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Mirror the Stack Overflow tag listing into a CSV file
///
/// Credentials are read from the `ACCESS_TOKEN` and `KEY` environment
/// variables (or a `.env` file); both are optional.
#[derive(Parser, Debug, Clone)]
#[command(name = "stackoverflow-tags")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Destination CSV file (truncated)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// API root
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Stack Exchange site identifier
    #[arg(long, default_value = DEFAULT_SITE)]
    pub site: String,

    /// Tags per page (1-100)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Seconds to wait between consecutive pages
    #[arg(long, default_value_t = 3.0)]
    pub delay_secs: f64,

    /// Attempts per page before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Stop after this many seconds and keep what was collected
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Abort immediately on undecodable responses instead of retrying
    #[arg(long)]
    pub no_retry_decode: bool,

    /// Exit with status 2 when the listing is incomplete
    #[arg(long)]
    pub strict: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Level used when `RUST_LOG` is unset
    pub fn default_log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Log filter from `RUST_LOG`, falling back to [`Cli::default_log_level`]
    pub fn log_filter(&self) -> EnvFilter {
        log_filter_from(
            std::env::var(EnvFilter::DEFAULT_ENV).ok(),
            self.default_log_level(),
        )
    }
}

fn log_filter_from(rust_log: Option<String>, default_level: Level) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(default_level.into()))
}
