//! Transient Fault Tests
//!
//! Validates bounded retry across the whole stack: resolver, pager and
//! file operations all go through the same executor.

use drive_paths::DrivePath;
use drive_types::FileId;
use remote_store::{FailurePolicy, StoreCall, StoreError};
use services_drive_files::{FileOperations, FilesError, PathOrId};
use std::time::Duration;
use tests_resilience::{flaky_bootstrap, seed_folders, test_bootstrap, TEST_RETRY_INTERVAL};

fn timeout() -> StoreError {
    StoreError::Timeout("simulated".to_string())
}

/// Test: A write survives transient failures within the retry budget
#[test]
fn test_write_recovers_from_transient_failures() {
    let (drive, session, sleeper) = flaky_bootstrap(
        3,
        FailurePolicy::FirstN {
            count: 2,
            error: timeout(),
        },
    );
    let folder = drive.add_folder(&FileId::root(), "folderA");

    let id = session
        .with_files(|files| {
            files.write(&PathOrId::Id(folder.clone()), "f.txt", "data", "text/plain")
        })
        .unwrap();

    assert_eq!(drive.content_of(&id).as_deref(), Some("data"));
    assert_eq!(sleeper.durations(), vec![TEST_RETRY_INTERVAL; 2]);
}

/// Test: A persistently failing call is attempted exactly max_retry + 1 times
#[test]
fn test_retry_budget_is_bounded() {
    let (drive, session, sleeper) =
        flaky_bootstrap(2, FailurePolicy::Always(StoreError::Unavailable("down".to_string())));

    let result = session.with_files(|files| files.read(&PathOrId::Id(FileId::root()), "f.txt"));

    assert!(matches!(
        result,
        Err(FilesError::Store(StoreError::Unavailable(_)))
    ));
    assert_eq!(sleeper.count(), 2);
    assert_eq!(sleeper.total(), TEST_RETRY_INTERVAL * 2);
    // Injected failures never reach the drive
    assert!(drive.list_requests().is_empty());
    assert_eq!(drive.count_calls(|c| *c == StoreCall::Close), 1);
}

/// Test: No retries at all when max_retry is zero
#[test]
fn test_zero_retries_fails_on_first_transient_error() {
    let (_drive, session, sleeper) = flaky_bootstrap(0, FailurePolicy::Always(timeout()));

    let result = session.with_files(|files| files.list(None, None, None));

    assert!(matches!(result, Err(FilesError::Store(StoreError::Timeout(_)))));
    assert_eq!(sleeper.count(), 0);
}

/// Test: Non-transient failures surface immediately, mid-path
#[test]
fn test_fatal_failure_during_resolution_is_not_retried() {
    let (drive, session, sleeper) = flaky_bootstrap(
        3,
        FailurePolicy::OnCall {
            index: 1,
            error: StoreError::NotAuthorized("token revoked".to_string()),
        },
    );
    seed_folders(&drive, &FileId::root(), &["a", "b"]);

    let result = session.with_files(|files| {
        files.read(&PathOrId::Path(DrivePath::from_names(["a", "b"])), "f.txt")
    });

    assert!(matches!(
        result,
        Err(FilesError::Store(StoreError::NotAuthorized(_)))
    ));
    assert_eq!(sleeper.count(), 0);
    // Only the lookup of "a" reached the drive
    assert_eq!(drive.list_requests().len(), 1);
}

/// Test: Backend statuses are classified by code
#[test]
fn test_backend_status_classification() {
    let (_drive, session, sleeper) = flaky_bootstrap(
        3,
        FailurePolicy::FirstN {
            count: 1,
            error: StoreError::Backend {
                status: 503,
                message: "backend error".to_string(),
            },
        },
    );
    assert!(session.with_files(|files| files.list(None, None, None)).is_ok());
    assert_eq!(sleeper.count(), 1);

    let (_drive, session, sleeper) = flaky_bootstrap(
        3,
        FailurePolicy::FirstN {
            count: 1,
            error: StoreError::Backend {
                status: 400,
                message: "bad request".to_string(),
            },
        },
    );
    assert!(session.with_files(|files| files.list(None, None, None)).is_err());
    assert_eq!(sleeper.count(), 0);
}

/// Test: A failed page is retried without restarting the listing
#[test]
fn test_page_failure_resumes_from_cursor() {
    let (drive, session, sleeper) = flaky_bootstrap(
        3,
        FailurePolicy::OnCall {
            index: 1,
            error: StoreError::RateLimited("slow down".to_string()),
        },
    );
    let drive = drive.with_page_size(2);
    for i in 0..5 {
        drive.add_file(&FileId::root(), &format!("f{}", i), "", "text/plain");
    }

    let entries = session
        .with_files(|files| files.list(None, None, None))
        .unwrap();

    assert_eq!(entries.len(), 5);
    assert_eq!(sleeper.count(), 1);

    let tokens: Vec<_> = drive
        .list_requests()
        .into_iter()
        .map(|r| r.page_token.map(|t| t.as_str().to_string()))
        .collect();
    assert_eq!(
        tokens,
        vec![None, Some("2".to_string()), Some("4".to_string())]
    );
}

/// Test: Acquiring the files resource is retried too
#[test]
fn test_acquisition_retries_then_operates() {
    let (drive, session) = test_bootstrap(2);
    drive.fail_next_opens([timeout(), timeout()]);
    let file = drive.add_file(&FileId::root(), "f.txt", "hello", "text/plain");

    let content = session
        .with_files(|files| {
            assert_eq!(files.executor().sleeper().count(), 2);
            files.read_file_id(&file)
        })
        .unwrap();

    assert_eq!(content, "hello");
    assert_eq!(drive.count_calls(|c| *c == StoreCall::OpenFiles), 3);
}

/// Test: Acquisition failure beyond the budget opens nothing to close
#[test]
fn test_acquisition_exhausted() {
    let (drive, session) = test_bootstrap(1);
    drive.fail_next_opens([timeout(), timeout()]);

    let result = session.with_files(|files| files.list(None, None, None));

    assert!(matches!(result, Err(FilesError::Store(StoreError::Timeout(_)))));
    assert_eq!(drive.count_calls(|c| *c == StoreCall::Close), 0);
}

/// Test: The interval is fixed, never backed off
#[test]
fn test_interval_is_constant() {
    let (_drive, session, sleeper) = flaky_bootstrap(
        4,
        FailurePolicy::FirstN {
            count: 4,
            error: timeout(),
        },
    );

    session.with_files(|files| files.list(None, None, None)).unwrap();

    assert_eq!(sleeper.durations(), vec![Duration::from_millis(250); 4]);
}

/// Test: A fresh handle picks up the backend's current fault policy
#[test]
fn test_policy_change_applies_to_next_handle() {
    let (drive, session, _sleeper) = flaky_bootstrap(0, FailurePolicy::Always(timeout()));
    drive.add_file(&FileId::root(), "f.txt", "x", "text/plain");

    assert!(session.with_files(|files| files.list(None, None, None)).is_err());

    session.backend().set_policy(FailurePolicy::Never);
    let entries = session
        .with_files(|files| files.list(None, None, None))
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(session.backend().drive().file_count(), 1);
}
