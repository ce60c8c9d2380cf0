//! Deadline helper for outbound calls
//!
//! `with_timeout` races a fallible future against a deadline. When the
//! deadline wins, the inner future is dropped, which aborts any in-flight
//! HTTP request it owns.

use std::future::Future;
use std::time::Duration;

/// Apply a deadline to an async operation
pub async fn with_timeout<T, E>(
    timeout: Duration,
    future: impl Future<Output = Result<T, E>>,
) -> Result<T, TimeoutError<E>> {
    match tokio::time::timeout(timeout, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(TimeoutError::Inner(err)),
        Err(_) => Err(TimeoutError::Elapsed(timeout)),
    }
}

/// Error type for deadline-bounded operations
#[derive(Debug, thiserror::Error)]
pub enum TimeoutError<E> {
    #[error("Operation timed out after {0:?}")]
    Elapsed(Duration),

    #[error(transparent)]
    Inner(E),
}

impl<E> TimeoutError<E> {
    pub fn is_elapsed(&self) -> bool {
        matches!(self, TimeoutError::Elapsed(_))
    }
}
