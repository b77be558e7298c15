//! Waiting between attempts

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Blocks the caller for the retry interval
pub trait Sleeper {
    /// Waits for `duration`
    fn sleep(&self, duration: Duration);
}

/// Sleeps the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested sleeps without blocking
///
/// Clones share the same record, so a test can keep one clone and hand
/// another to the executor under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Creates a sleeper with an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration requested so far, in order
    pub fn durations(&self) -> Vec<Duration> {
        self.slept
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of sleeps requested so far
    pub fn count(&self) -> usize {
        self.slept.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Sum of every requested duration
    pub fn total(&self) -> Duration {
        self.durations().into_iter().sum()
    }

    /// Forgets every recorded sleep
    pub fn reset(&self) {
        self.slept
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sleeper_shares_record_across_clones() {
        let sleeper = RecordingSleeper::new();
        let handle = sleeper.clone();

        sleeper.sleep(Duration::from_millis(10));
        sleeper.sleep(Duration::from_millis(20));

        assert_eq!(handle.count(), 2);
        assert_eq!(handle.total(), Duration::from_millis(30));
        assert_eq!(
            handle.durations(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
    }

    #[test]
    fn test_recording_sleeper_reset() {
        let sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_secs(1));
        sleeper.reset();
        assert_eq!(sleeper.count(), 0);
    }

    #[test]
    fn test_thread_sleeper_zero_duration() {
        ThreadSleeper.sleep(Duration::ZERO);
    }
}
