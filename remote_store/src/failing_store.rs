//! # Failing Store
//!
//! A [`RemoteFileStore`] wrapper that can simulate remote failures.
//! Useful for exercising retry behaviour without a flaky network.

use crate::error::StoreError;
use crate::request::{ListPage, ListRequest};
use crate::store::RemoteFileStore;
use drive_types::{Entry, FileId};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Policy for when failures should occur
///
/// Calls are counted across every operation except `close`, starting at 0.
#[derive(Debug, Clone)]
pub enum FailurePolicy {
    /// Never fail (passthrough)
    Never,
    /// Fail the first `count` calls with `error`
    FirstN { count: usize, error: StoreError },
    /// Fail only the call with this index
    OnCall { index: usize, error: StoreError },
    /// Fail every call
    Always(StoreError),
}

/// Wrapper around a store that can simulate failures
///
/// A failed call never reaches the inner store.
#[derive(Debug)]
pub struct FailingStore<S> {
    inner: S,
    policy: FailurePolicy,
    attempts: AtomicUsize,
}

impl<S: RemoteFileStore> FailingStore<S> {
    /// Create a new failing store with the given policy
    pub fn new(inner: S, policy: FailurePolicy) -> Self {
        Self {
            inner,
            policy,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Get the underlying store (for inspection)
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of calls attempted so far, failed or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Reset the failure policy
    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
        self.attempts.store(0, Ordering::SeqCst);
    }

    /// Counts the call and returns the error to inject, if any
    fn check(&self) -> Result<(), StoreError> {
        let index = self.attempts.fetch_add(1, Ordering::SeqCst);
        match &self.policy {
            FailurePolicy::Never => Ok(()),
            FailurePolicy::FirstN { count, error } if index < *count => Err(error.clone()),
            FailurePolicy::FirstN { .. } => Ok(()),
            FailurePolicy::OnCall { index: at, error } if index == *at => Err(error.clone()),
            FailurePolicy::OnCall { .. } => Ok(()),
            FailurePolicy::Always(error) => Err(error.clone()),
        }
    }
}

impl<S: RemoteFileStore> RemoteFileStore for FailingStore<S> {
    fn list_children(&self, request: &ListRequest) -> Result<ListPage, StoreError> {
        self.check()?;
        self.inner.list_children(request)
    }

    fn create_file(
        &self,
        parent: &FileId,
        name: &str,
        content: &str,
        mime_type: &str,
    ) -> Result<Entry, StoreError> {
        self.check()?;
        self.inner.create_file(parent, name, content, mime_type)
    }

    fn get_file_content(&self, file_id: &FileId) -> Result<String, StoreError> {
        self.check()?;
        self.inner.get_file_content(file_id)
    }

    fn update_file_content(
        &self,
        file_id: &FileId,
        content: &str,
        mime_type: &str,
    ) -> Result<(), StoreError> {
        self.check()?;
        self.inner.update_file_content(file_id, content, mime_type)
    }

    fn delete_file(&self, file_id: &FileId) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete_file(file_id)
    }

    fn close(&self) -> Result<(), StoreError> {
        // Release always reaches the inner store
        self.inner.close()
    }
}
