//! Pagination driver
//!
//! Walks the tag listing page by page until the server reports no more
//! pages, a page exhausts its retry budget, or the caller cancels.
//!
//! ```text
//! Start → Fetching(1) → Fetching(n+1) … → Done
//!              │               │
//!              └──── retries exhausted / cancelled ──→ Aborted
//! ```

use super::pacing::{Sleeper, TokioSleeper};
use super::types::{AbortReason, Completion, Listing, PaginationState};
use crate::config::ListingConfig;
use crate::error::FetchError;
use crate::http::PageFetcher;
use crate::types::TagPage;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Collects the full tag listing from a [`PageFetcher`]
pub struct TagCollector<F, S = TokioSleeper> {
    fetcher: F,
    sleeper: S,
    config: ListingConfig,
}

impl<F: PageFetcher> TagCollector<F, TokioSleeper> {
    /// Create a collector that waits on the tokio timer
    pub fn new(fetcher: F, config: ListingConfig) -> Self {
        Self::with_sleeper(fetcher, TokioSleeper, config)
    }
}

impl<F: PageFetcher, S: Sleeper> TagCollector<F, S> {
    /// Create a collector with a custom sleeper
    pub fn with_sleeper(fetcher: F, sleeper: S, config: ListingConfig) -> Self {
        Self {
            fetcher,
            sleeper,
            config,
        }
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The sleeper used for pacing
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// The listing config
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Fetch every page, starting at page 1
    ///
    /// Never fails outright: an early stop is reported through
    /// [`Completion::Aborted`] alongside whatever was collected.
    pub async fn collect(&self, cancel: &CancellationToken) -> Listing {
        let mut state = PaginationState::new();

        loop {
            let page = match self.fetch_with_retry(&mut state, cancel).await {
                Ok(page) => page,
                Err(reason) => {
                    warn!(
                        "Stopping at page {} with {} tags collected: {}",
                        state.page,
                        state.tags.len(),
                        reason
                    );
                    return state.abort(reason);
                }
            };

            log_quota(state.page, &page);
            let has_more = page.has_more;
            debug!("Page {} returned {} tags", state.page, page.items.len());
            state.record_page(page.items);

            if !has_more {
                info!(
                    "Listing complete: {} tags over {} pages",
                    state.tags.len(),
                    state.pages_fetched
                );
                return state.finish(Completion::Complete);
            }

            state.next_page();
            if !self.pause(self.config.request_delay, cancel).await {
                warn!("Cancelled before page {}", state.page);
                return state.abort(AbortReason::Cancelled);
            }
        }
    }

    /// Fetch the current page, retrying per the policy
    async fn fetch_with_retry(
        &self,
        state: &mut PaginationState,
        cancel: &CancellationToken,
    ) -> Result<TagPage, AbortReason> {
        let policy = &self.config.retry;
        let mut attempt = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(AbortReason::Cancelled);
            }

            attempt += 1;
            state.record_request();

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(AbortReason::Cancelled),
                result = self.fetcher.fetch_page(state.page) => result,
            };

            let err = match result {
                Ok(page) => return Ok(page),
                Err(err) => err,
            };

            let eligible = err.is_retryable()
                || (matches!(err, FetchError::Decode { .. }) && policy.retry_decode_errors);
            if !eligible {
                return Err(AbortReason::NonRetryable(err));
            }

            if attempt >= policy.max_attempts {
                return Err(AbortReason::RetriesExhausted {
                    attempts: attempt,
                    last_error: err,
                });
            }

            let delay = policy.backoff_for(attempt);
            warn!(
                "Page {} failed: {}, attempt {}/{}, retrying in {:?}",
                state.page, err, attempt, policy.max_attempts, delay
            );
            if !self.pause(delay, cancel).await {
                return Err(AbortReason::Cancelled);
            }
        }
    }

    /// Sleep unless cancelled first; returns false on cancellation
    async fn pause(&self, delay: Duration, cancel: &CancellationToken) -> bool {
        if delay.is_zero() {
            return !cancel.is_cancelled();
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => false,
            () = self.sleeper.sleep(delay) => true,
        }
    }
}

fn log_quota(page: u32, envelope: &TagPage) {
    debug!(
        "Quota after page {}: {}/{} remaining",
        page, envelope.quota_remaining, envelope.quota_max
    );
    if envelope.quota_max > 0 && envelope.quota_remaining == 0 {
        warn!("API quota exhausted after page {}", page);
    }
}

impl<F, S> std::fmt::Debug for TagCollector<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagCollector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
