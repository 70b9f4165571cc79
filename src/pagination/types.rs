//! Pagination types
//!
//! State carried through one listing run and the outcome handed back to
//! the caller.

use crate::error::FetchError;
use crate::types::Tag;
use thiserror::Error;

/// Why a listing stopped before the last page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// Every attempt allowed for the page failed
    #[error("gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Attempts made for the page
        attempts: u32,
        /// Error of the final attempt
        last_error: FetchError,
    },

    /// The page failed in a way the policy does not retry
    #[error("non-retryable failure: {0}")]
    NonRetryable(FetchError),

    /// The caller cancelled the run or its deadline elapsed
    #[error("cancelled")]
    Cancelled,
}

/// How a listing ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The last page reported no continuation
    Complete,
    /// Stopped early; the listing may be incomplete
    Aborted {
        /// Page that could not be fetched
        page: u32,
        /// What went wrong
        reason: AbortReason,
    },
}

impl Completion {
    /// Check if the listing reached the last page
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Check if the listing stopped early
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

/// Result of a listing run
///
/// Tags are in fetch order, page by page, without deduplication. An
/// aborted listing still carries every tag of the pages before the
/// failing one; an empty aborted listing does not mean there are no tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Accumulated tags
    pub tags: Vec<Tag>,
    /// Pages fetched successfully
    pub pages_fetched: u32,
    /// Requests issued, retries included
    pub requests_issued: u32,
    /// How the run ended
    pub completion: Completion,
}

impl Listing {
    /// Check if the listing is known to be complete
    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }

    /// Abort reason, if the run stopped early
    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match &self.completion {
            Completion::Aborted { reason, .. } => Some(reason),
            Completion::Complete => None,
        }
    }
}

/// Tracks progress during one listing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Page to fetch next (1-based)
    pub page: u32,
    /// Pages fetched successfully
    pub pages_fetched: u32,
    /// Requests issued, retries included
    pub requests_issued: u32,
    /// Tags accumulated so far
    pub tags: Vec<Tag>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            pages_fetched: 0,
            requests_issued: 0,
            tags: Vec::new(),
        }
    }
}

impl PaginationState {
    /// Create state positioned at page 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request about to be issued
    pub fn record_request(&mut self) {
        self.requests_issued += 1;
    }

    /// Append a fetched page's tags
    pub fn record_page(&mut self, items: Vec<Tag>) {
        self.pages_fetched += 1;
        self.tags.extend(items);
    }

    /// Advance to the next page
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Finish the run
    pub fn finish(self, completion: Completion) -> Listing {
        Listing {
            tags: self.tags,
            pages_fetched: self.pages_fetched,
            requests_issued: self.requests_issued,
            completion,
        }
    }

    /// Finish the run early at the current page
    pub fn abort(self, reason: AbortReason) -> Listing {
        let page = self.page;
        self.finish(Completion::Aborted { page, reason })
    }
}
