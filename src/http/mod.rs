//! HTTP module
//!
//! The page fetcher: one GET against `/tags` per call, decoded into a
//! [`TagPage`](crate::types::TagPage).
//!
//! # Contract
//!
//! - **No retries**: every call issues exactly one request
//! - **No pacing**: sleeping between requests is the driver's job
//! - **Classified failures**: transport, status and decode errors are
//!   reported as distinct [`FetchError`](crate::error::FetchError) variants

mod client;

pub use client::{PageFetcher, TagClient};

#[cfg(test)]
mod tests;
