//! Request pacing
//!
//! The driver never calls `tokio::time::sleep` directly. It goes through a
//! [`Sleeper`] so tests can observe or skip the waits.

use async_trait::async_trait;
use std::time::Duration;

/// Waits for a given duration
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
