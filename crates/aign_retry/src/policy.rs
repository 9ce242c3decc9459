//! Count-bounded, fixed-interval retry.

use aign_error::{ConfigError, ExhaustedRetriesError};
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::FixedInterval};
use tracing::{debug, error, warn};

/// Attempt cap and backoff interval for [`retry`].
///
/// # Examples
///
/// ```
/// use aign_retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 10);
/// assert_eq!(policy.backoff(), Duration::from_millis(2333));
///
/// assert!(RetryPolicy::new(0, Duration::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Default attempt cap.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
    /// Default pause between attempts.
    pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(2333);

    /// Create a policy; at least one attempt is required.
    #[track_caller]
    pub fn new(max_attempts: u32, backoff: Duration) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::new("retry.max_attempts must be at least 1"));
        }
        Ok(Self {
            max_attempts,
            backoff,
        })
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between attempts.
    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            backoff: Self::DEFAULT_BACKOFF,
        }
    }
}

/// Run `thunk` until it succeeds or `policy.max_attempts()` attempts have failed.
///
/// Every error is treated as transient: it is logged, the task sleeps for the
/// fixed backoff, and the thunk is called again. The wrapper knows nothing
/// about what the thunk does; it only needs the error to be displayable.
///
/// # Errors
///
/// Returns [`ExhaustedRetriesError`] carrying the operation name, the number
/// of attempts made and the rendered error of the final attempt.
pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut thunk: F,
) -> Result<T, ExhaustedRetriesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = AtomicU32::new(0);
    let cap = policy.max_attempts;

    // First attempt is not part of the strategy.
    let strategy = FixedInterval::new(policy.backoff).take(cap.saturating_sub(1) as usize);

    let result = Retry::spawn(strategy, || {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        let call = thunk();
        async move {
            match call.await {
                Ok(value) => {
                    debug!(operation, attempt, "Attempt succeeded");
                    Ok(value)
                }
                Err(e) => {
                    warn!(operation, attempt, max_attempts = cap, error = %e, "Attempt failed, will retry");
                    Err(RetryError::Transient {
                        err: e.to_string(),
                        retry_after: None,
                    })
                }
            }
        }
    })
    .await;

    result.map_err(|last_error| {
        let made = attempts.load(Ordering::SeqCst);
        error!(operation, attempts = made, error = %last_error, "Retries exhausted");
        ExhaustedRetriesError::new(operation, made, last_error)
    })
}
