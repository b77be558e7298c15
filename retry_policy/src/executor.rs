//! Retrying executor
//!
//! Runs a fallible operation, repeating it on transient failures until it
//! succeeds, fails permanently, or the retry budget is spent.

use crate::sleeper::{Sleeper, ThreadSleeper};
use crate::{RetryPolicy, Transient};
use std::fmt;
use tracing::{error, warn};

/// Executes operations under a [`RetryPolicy`]
#[derive(Debug, Clone, Default)]
pub struct RetryingExecutor<Z = ThreadSleeper> {
    policy: RetryPolicy,
    sleeper: Z,
}

impl RetryingExecutor<ThreadSleeper> {
    /// Creates an executor that sleeps the calling thread between attempts
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, ThreadSleeper)
    }
}

impl<Z: Sleeper> RetryingExecutor<Z> {
    /// Creates an executor with a custom sleeper
    pub fn with_sleeper(policy: RetryPolicy, sleeper: Z) -> Self {
        Self { policy, sleeper }
    }

    /// Returns the policy this executor applies
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the sleeper used between attempts
    pub fn sleeper(&self) -> &Z {
        &self.sleeper
    }

    /// Runs `operation` until it succeeds or fails for good
    ///
    /// - Success is returned immediately.
    /// - A non-transient error is returned on first occurrence.
    /// - A transient error is retried after `retry_interval`, unless
    ///   `max_retry` retries have already been made, in which case that
    ///   last error is returned.
    ///
    /// The operation is called unchanged on every attempt.
    pub fn execute<T, E, F>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Transient + fmt::Display,
    {
        let mut retries = 0;

        loop {
            match operation() {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) => {
                    if retries == self.policy.max_retry {
                        error!(
                            retries,
                            max_retry = self.policy.max_retry,
                            error = %err,
                            "retry budget exhausted"
                        );
                        return Err(err);
                    }

                    retries += 1;
                    warn!(
                        attempt = retries,
                        max_retry = self.policy.max_retry,
                        interval_ms = self.policy.retry_interval.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    self.sleeper.sleep(self.policy.retry_interval);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSleeper;
    use std::cell::Cell;
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Timeout,
        Denied,
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TestError::Timeout => write!(f, "timeout"),
                TestError::Denied => write!(f, "denied"),
            }
        }
    }

    impl Transient for TestError {
        fn is_transient(&self) -> bool {
            matches!(self, TestError::Timeout)
        }
    }

    fn executor(max_retry: u32) -> (RetryingExecutor<RecordingSleeper>, RecordingSleeper) {
        let sleeper = RecordingSleeper::new();
        let policy = RetryPolicy::new(max_retry, Duration::from_millis(100));
        (RetryingExecutor::with_sleeper(policy, sleeper.clone()), sleeper)
    }

    /// Fails with `Timeout` for the first `failures` calls, then succeeds
    fn flaky(failures: u32, calls: &Cell<u32>) -> Result<&'static str, TestError> {
        calls.set(calls.get() + 1);
        if calls.get() <= failures {
            Err(TestError::Timeout)
        } else {
            Ok("done")
        }
    }

    #[test]
    fn test_success_on_first_attempt() {
        let (executor, sleeper) = executor(3);
        let calls = Cell::new(0);

        let result = executor.execute(|| flaky(0, &calls));

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.get(), 1);
        assert_eq!(sleeper.count(), 0);
    }

    #[test]
    fn test_n_transient_failures_then_success() {
        for n in 0..5 {
            let (executor, sleeper) = executor(n);
            let calls = Cell::new(0);

            let result = executor.execute(|| flaky(n, &calls));

            assert_eq!(result, Ok("done"), "max_retry = {}", n);
            assert_eq!(calls.get(), n + 1);
            assert_eq!(sleeper.count(), n as usize);
        }
    }

    #[test]
    fn test_budget_exhausted_after_n_plus_one_failures() {
        for n in 0..5 {
            let (executor, sleeper) = executor(n);
            let calls = Cell::new(0);

            let result = executor.execute(|| flaky(n + 1, &calls));

            assert_eq!(result, Err(TestError::Timeout), "max_retry = {}", n);
            assert_eq!(calls.get(), n + 1);
            // No sleep after the final failed attempt
            assert_eq!(sleeper.count(), n as usize);
        }
    }

    #[test]
    fn test_non_transient_error_is_not_retried() {
        let (executor, sleeper) = executor(3);
        let calls = Cell::new(0);

        let result: Result<(), TestError> = executor.execute(|| {
            calls.set(calls.get() + 1);
            Err(TestError::Denied)
        });

        assert_eq!(result, Err(TestError::Denied));
        assert_eq!(calls.get(), 1);
        assert_eq!(sleeper.count(), 0);
    }

    #[test]
    fn test_non_transient_after_transient_stops_retrying() {
        let (executor, sleeper) = executor(5);
        let calls = Cell::new(0);

        let result: Result<(), TestError> = executor.execute(|| {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                Err(TestError::Timeout)
            } else {
                Err(TestError::Denied)
            }
        });

        assert_eq!(result, Err(TestError::Denied));
        assert_eq!(calls.get(), 2);
        assert_eq!(sleeper.count(), 1);
    }

    #[test]
    fn test_zero_max_retry_attempts_once() {
        let (executor, sleeper) = executor(0);
        let calls = Cell::new(0);

        let result = executor.execute(|| flaky(1, &calls));

        assert_eq!(result, Err(TestError::Timeout));
        assert_eq!(calls.get(), 1);
        assert_eq!(sleeper.count(), 0);
    }

    #[test]
    fn test_sleeps_use_fixed_interval() {
        let (executor, sleeper) = executor(3);
        let calls = Cell::new(0);

        executor.execute(|| flaky(3, &calls)).unwrap();

        assert_eq!(sleeper.durations(), vec![Duration::from_millis(100); 3]);
        assert_eq!(sleeper.total(), executor.policy().max_total_delay());
    }
}
