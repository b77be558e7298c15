//! Resilience Test Utilities
//!
//! This crate provides shared utilities for resilience and integration tests.
//!
//! ## Test Philosophy
//!
//! - **Bounded failure**: A remote call is attempted at most `max_retry + 1` times
//! - **Deterministic faults**: Every failure is injected by a [`FailurePolicy`]
//! - **No leaked resources**: A files resource is closed on every exit path
//! - **Consistency**: What was written is what is read back, after any retries

use drive_types::FileId;
use remote_store::{
    DriveBackend, FailingStore, FailurePolicy, InMemoryDrive, InMemoryFiles, StoreError,
};
use retry_policy::{RecordingSleeper, RetryPolicy};
use services_drive_files::DriveSession;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Retry interval used by test sessions
pub const TEST_RETRY_INTERVAL: Duration = Duration::from_millis(250);

/// Session type used throughout the resilience tests
pub type TestSession<B> = DriveSession<B, RecordingSleeper>;

/// Routes `tracing` output to the test harness
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
        )
        .with_test_writer()
        .try_init();
}

/// Bootstrap helper for tests
///
/// Creates an empty drive and a session over it with `max_retry` retries
/// at [`TEST_RETRY_INTERVAL`]. Sleeps are recorded, never taken.
pub fn test_bootstrap(max_retry: u32) -> (InMemoryDrive, TestSession<InMemoryDrive>) {
    init_tracing();
    let drive = InMemoryDrive::new();
    let session = DriveSession::with_sleeper(
        drive.clone(),
        RetryPolicy::new(max_retry, TEST_RETRY_INTERVAL),
        RecordingSleeper::new(),
    );
    (drive, session)
}

/// Like [`test_bootstrap`], but every files resource injects faults
pub fn flaky_bootstrap(
    max_retry: u32,
    policy: FailurePolicy,
) -> (InMemoryDrive, TestSession<FlakyDrive>, RecordingSleeper) {
    init_tracing();
    let drive = InMemoryDrive::new();
    let sleeper = RecordingSleeper::new();
    let session = DriveSession::with_sleeper(
        FlakyDrive::new(drive.clone(), policy),
        RetryPolicy::new(max_retry, TEST_RETRY_INTERVAL),
        sleeper.clone(),
    );
    (drive, session, sleeper)
}

/// Creates the folder chain `names` under `root`, returning each folder's ID
pub fn seed_folders(drive: &InMemoryDrive, root: &FileId, names: &[&str]) -> Vec<FileId> {
    let mut ids = Vec::with_capacity(names.len());
    let mut parent = root.clone();
    for name in names {
        let id = drive.add_folder(&parent, name);
        ids.push(id.clone());
        parent = id;
    }
    ids
}

/// Backend whose files resources fail according to a policy
///
/// Each opened resource starts with a fresh copy of the policy, so call
/// indices restart at 0 for every handle.
#[derive(Debug, Clone)]
pub struct FlakyDrive {
    drive: InMemoryDrive,
    policy: Arc<Mutex<FailurePolicy>>,
}

impl FlakyDrive {
    pub fn new(drive: InMemoryDrive, policy: FailurePolicy) -> Self {
        Self {
            drive,
            policy: Arc::new(Mutex::new(policy)),
        }
    }

    /// Changes the policy given to resources opened from now on
    pub fn set_policy(&self, policy: FailurePolicy) {
        *self.policy.lock().unwrap_or_else(PoisonError::into_inner) = policy;
    }

    /// The underlying drive
    pub fn drive(&self) -> &InMemoryDrive {
        &self.drive
    }
}

impl DriveBackend for FlakyDrive {
    type Files = FailingStore<InMemoryFiles>;

    fn open_files(&self) -> Result<Self::Files, StoreError> {
        let files = self.drive.open_files()?;
        let policy = self
            .policy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Ok(FailingStore::new(files, policy))
    }
}
