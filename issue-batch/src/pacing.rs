//! Fixed pacing between API requests.
//!
//! The submitter waits a constant delay between consecutive create-issue
//! calls to stay clear of GitHub's secondary rate limits. The wait goes
//! through [`Pacer`] so tests can count or skip it.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Longest accepted inter-request delay (1 hour).
pub const MAX_DELAY: Duration = Duration::from_secs(3600);

/// Default delay between create-issue requests.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Errors produced when validating a delay.
#[derive(Debug, Error, PartialEq)]
pub enum PacingError {
    /// Negative, NaN or infinite value.
    #[error("delay must be a non-negative number of seconds, got {0}")]
    Invalid(f64),

    /// Longer than [`MAX_DELAY`].
    #[error("delay of {secs}s exceeds the maximum of {max_secs}s")]
    TooLong { secs: f64, max_secs: u64 },
}

/// Suspends the run between two submissions.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits for `delay` before the next request.
    async fn pause(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        debug!(delay = ?delay, "Waiting before next request");
        tokio::time::sleep(delay).await;
    }
}

/// Converts a delay given in seconds into a [`Duration`].
///
/// # Errors
///
/// Returns [`PacingError`] if the value is negative, not finite, or above
/// [`MAX_DELAY`].
pub fn delay_from_secs(secs: f64) -> Result<Duration, PacingError> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(PacingError::Invalid(secs));
    }
    // Checked before converting: `Duration::from_secs_f64` panics on overflow.
    if secs > MAX_DELAY.as_secs_f64() {
        return Err(PacingError::TooLong {
            secs,
            max_secs: MAX_DELAY.as_secs(),
        });
    }
    Ok(Duration::from_secs_f64(secs))
}
