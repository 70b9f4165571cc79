//! # stackoverflow-tags
//!
//! Mirrors the Stack Overflow tag listing from the Stack Exchange API into
//! a local CSV file.
//!
//! The API is page-number paginated and rate limited, so the listing is
//! walked one page at a time with a fixed pause between pages and a bounded
//! number of attempts per page. A run that cannot finish still hands back
//! every tag collected before the failure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stackoverflow_tags::config::{Credentials, FetchConfig, ListingConfig};
//! use stackoverflow_tags::http::TagClient;
//! use stackoverflow_tags::output::write_tags_csv;
//! use stackoverflow_tags::pagination::TagCollector;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> stackoverflow_tags::Result<()> {
//!     let config = FetchConfig::builder()
//!         .credentials(Credentials::from_env())
//!         .build();
//!     let collector = TagCollector::new(TagClient::new(config)?, ListingConfig::default());
//!
//!     let listing = collector.collect(&CancellationToken::new()).await;
//!     write_tags_csv("/tmp/stackoverflow_tags.csv", &listing.tags)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  fetch_page(n)  ┌─────────────┐   GET /tags?page=n
//! │ TagCollector │ ──────────────→ │  TagClient  │ ──────────────────→ API
//! │  (retry,     │ ←────────────── │  (decode)   │
//! │   pacing)    │  TagPage / err  └─────────────┘
//! └──────┬───────┘
//!        │ Listing
//!        ▼
//!   write_tags_csv
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Tag records and shared types
pub mod types;

/// Run configuration and credentials
pub mod config;

/// Page fetcher
pub mod http;

/// Pagination driver
pub mod pagination;

/// CSV output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, FetchError, Result};
pub use types::*;

pub use http::{PageFetcher, TagClient};
pub use pagination::{Completion, Listing, TagCollector};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
