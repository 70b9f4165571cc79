//! CLI runner - executes a listing run

use crate::cli::commands::Cli;
use crate::config::{Credentials, FetchConfig, ListingConfig, OutputConfig, RetryPolicy};
use crate::error::{Error, Result};
use crate::http::TagClient;
use crate::output::write_tags_csv;
use crate::pagination::{AbortReason, TagCollector};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Exit status for a listing that stopped early under `--strict`
pub const EXIT_INCOMPLETE: i32 = 2;

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows in the CSV file
    pub rows_written: usize,
    /// Requests issued, retries included
    pub requests_issued: u32,
    /// Why the listing stopped early, if it did
    pub abort_reason: Option<AbortReason>,
    /// Where the CSV file went
    pub output: PathBuf,
}

impl RunSummary {
    /// Check if every page was fetched
    pub fn is_complete(&self) -> bool {
        self.abort_reason.is_none()
    }

    /// Process exit status for this run
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && !self.is_complete() {
            EXIT_INCOMPLETE
        } else {
            0
        }
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parsed arguments
    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Run with credentials from the environment, cancelling on Ctrl-C
    pub async fn run(&self) -> Result<RunSummary> {
        let credentials = Credentials::from_env();
        if credentials.is_anonymous() {
            info!("No API credentials set, using the anonymous quota");
        }

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, keeping the tags collected so far");
                on_interrupt.cancel();
            }
        });

        let result = self.run_with(credentials, &cancel).await;
        interrupt.abort();
        result
    }

    /// Run with explicit credentials and cancellation
    pub async fn run_with(
        &self,
        credentials: Credentials,
        cancel: &CancellationToken,
    ) -> Result<RunSummary> {
        let client = TagClient::new(self.fetch_config(credentials)?)?;
        let collector = TagCollector::new(client, self.listing_config()?);
        let output = self.output_config();

        let cancel = cancel.child_token();
        let deadline = self.cli.deadline_secs.map(|secs| {
            let token = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                warn!("Deadline of {}s reached", secs);
                token.cancel();
            })
        });

        let listing = collector.collect(&cancel).await;
        if let Some(handle) = deadline {
            handle.abort();
        }

        if let Some(reason) = listing.abort_reason() {
            warn!(
                "Listing may be incomplete ({} tags kept): {}",
                listing.tags.len(),
                reason
            );
        }

        let rows_written = write_tags_csv(&output.path, &listing.tags)?;

        Ok(RunSummary {
            rows_written,
            requests_issued: listing.requests_issued,
            abort_reason: listing.abort_reason().cloned(),
            output: output.path,
        })
    }

    /// Fetcher config from the arguments
    pub fn fetch_config(&self, credentials: Credentials) -> Result<FetchConfig> {
        let config = FetchConfig::builder()
            .base_url(&self.cli.base_url)
            .site(&self.cli.site)
            .page_size(self.cli.page_size)
            .timeout(Duration::from_secs(self.cli.timeout_secs))
            .credentials(credentials)
            .build();
        config.validate()?;
        Ok(config)
    }

    /// Driver config from the arguments
    pub fn listing_config(&self) -> Result<ListingConfig> {
        let request_delay = Duration::try_from_secs_f64(self.cli.delay_secs)
            .map_err(|e| Error::invalid_value("delay_secs", e.to_string()))?;
        let retry = RetryPolicy::with_max_attempts(self.cli.max_attempts)
            .retry_decode_errors(!self.cli.no_retry_decode);

        let config = ListingConfig::new(request_delay, retry);
        config.validate()?;
        Ok(config)
    }

    /// Output config from the arguments
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            path: self.cli.output.clone(),
        }
    }
}
