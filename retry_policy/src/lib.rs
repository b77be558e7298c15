//! # Retry Policy
//!
//! Bounded, fixed-interval retry of remote calls.
//!
//! ## Philosophy
//!
//! - **Bounded failure semantics**: A call is attempted at most `max_retry + 1` times
//! - **Fixed delay**: Every retry waits exactly `retry_interval`, no backoff, no jitter
//! - **Only transient failures are retried**: Errors classify themselves via [`Transient`]
//! - **Per-instance policy**: Each executor owns its policy; there is no global setting
//!
//! ## Core Concepts
//!
//! - [`RetryPolicy`]: `max_retry` and `retry_interval`
//! - [`RetryingExecutor`]: Runs an operation under a policy
//! - [`Sleeper`]: How the executor waits between attempts

pub mod executor;
pub mod sleeper;

pub use executor::RetryingExecutor;
pub use sleeper::{RecordingSleeper, Sleeper, ThreadSleeper};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classifies an error as retry-worthy or not
pub trait Transient {
    /// Returns true if the failure may succeed when the same call is repeated
    fn is_transient(&self) -> bool;
}

/// Retry policy for remote calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt (0 = no retries)
    pub max_retry: u32,
    /// Delay before each retry
    pub retry_interval: Duration,
}

impl RetryPolicy {
    /// Default number of retries
    pub const DEFAULT_MAX_RETRY: u32 = 3;

    /// Default delay between retries
    pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

    /// Creates a policy with explicit settings
    pub fn new(max_retry: u32, retry_interval: Duration) -> Self {
        Self {
            max_retry,
            retry_interval,
        }
    }

    /// No retries - fail on the first transient error
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Sets the maximum number of retries
    pub fn with_max_retry(mut self, max_retry: u32) -> Self {
        self.max_retry = max_retry;
        self
    }

    /// Sets the delay between retries
    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    /// Upper bound on the time spent sleeping for a single call
    pub fn max_total_delay(&self) -> Duration {
        self.retry_interval.saturating_mul(self.max_retry)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_RETRY, Self::DEFAULT_RETRY_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retry, 3);
        assert_eq!(policy.retry_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_none_policy() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_retry, 0);
        assert_eq!(policy.max_total_delay(), Duration::ZERO);
    }

    #[test]
    fn test_builder_methods() {
        let policy = RetryPolicy::default()
            .with_max_retry(5)
            .with_retry_interval(Duration::from_millis(250));
        assert_eq!(policy.max_retry, 5);
        assert_eq!(policy.retry_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_max_total_delay() {
        let policy = RetryPolicy::new(4, Duration::from_millis(500));
        assert_eq!(policy.max_total_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_policy_serialization() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1500));
        let json = serde_json::to_string(&policy).unwrap();
        let back: RetryPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }
}
