//! Drive session
//!
//! A session owns the backend (transport and credentials) and the retry
//! policy. It hands out [`DriveFiles`] handles, each bound to a fresh
//! files resource.

use crate::config::{ConfigError, DriveConfig};
use crate::files::DriveFiles;
use crate::operations::FilesError;
use remote_store::DriveBackend;
use retry_policy::{RetryPolicy, RetryingExecutor, Sleeper, ThreadSleeper};
use tracing::{debug, warn};

/// Authorization scope a backend must be granted for full drive access
pub const SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Entry point for drive file operations
pub struct DriveSession<B, Z = ThreadSleeper> {
    backend: B,
    policy: RetryPolicy,
    sleeper: Z,
}

impl<B: DriveBackend> DriveSession<B> {
    /// Creates a session with the default retry policy
    pub fn new(backend: B) -> Self {
        Self::with_sleeper(backend, RetryPolicy::default(), ThreadSleeper)
    }

    /// Creates a session with the retry policy from `config`
    pub fn from_config(backend: B, config: &DriveConfig) -> Result<Self, ConfigError> {
        let policy = config.retry_policy()?;
        Ok(Self::with_sleeper(backend, policy, ThreadSleeper))
    }
}

impl<B: DriveBackend, Z: Sleeper + Clone> DriveSession<B, Z> {
    /// Creates a session with an explicit policy and sleeper
    pub fn with_sleeper(backend: B, policy: RetryPolicy, sleeper: Z) -> Self {
        Self {
            backend,
            policy,
            sleeper,
        }
    }

    /// Replaces the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the retry policy for handles opened from now on
    pub fn set_policy(&mut self, policy: RetryPolicy) {
        self.policy = policy;
    }

    /// The session's retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The backend this session talks to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Opens a handle with the session's retry policy
    pub fn files(&self) -> Result<DriveFiles<B::Files, Z>, FilesError> {
        self.files_with(self.policy)
    }

    /// Opens a handle with its own retry policy
    ///
    /// Acquiring the files resource is itself retried under `policy`.
    pub fn files_with(&self, policy: RetryPolicy) -> Result<DriveFiles<B::Files, Z>, FilesError> {
        let executor = RetryingExecutor::with_sleeper(policy, self.sleeper.clone());
        let store = executor.execute(|| self.backend.open_files())?;
        debug!(max_retry = policy.max_retry, "opened files resource");
        Ok(DriveFiles::with_executor(store, executor))
    }

    /// Runs `f` with a fresh handle and closes it afterwards
    ///
    /// The resource is closed whether `f` succeeds or fails. An error from
    /// `f` takes precedence over an error from closing.
    pub fn with_files<T, F>(&self, f: F) -> Result<T, FilesError>
    where
        F: FnOnce(&DriveFiles<B::Files, Z>) -> Result<T, FilesError>,
    {
        let files = self.files()?;
        let result = f(&files);
        let closed = files.close();

        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                warn!(error = %close_err, "failed to close files resource after error");
                Err(err)
            }
        }
    }
}
