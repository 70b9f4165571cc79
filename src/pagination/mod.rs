//! Pagination module
//!
//! Drives the page fetcher from page 1 until the server stops reporting
//! `has_more`, with a fixed pause between pages and a bounded retry
//! budget per page.
//!
//! # Overview
//!
//! - [`TagCollector`] owns the loop and the accumulated tags
//! - [`Sleeper`] is the pacing seam; [`TokioSleeper`] is the real one
//! - [`Listing`] is the outcome: tags plus a [`Completion`] that says
//!   whether the listing is known to be complete

mod driver;
mod pacing;
mod types;

pub use driver::TagCollector;
pub use pacing::{Sleeper, TokioSleeper};
pub use types::{AbortReason, Completion, Listing, PaginationState};
