//! Remote store errors

use drive_types::FileId;
use retry_policy::Transient;
use thiserror::Error;

/// Errors reported by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The call did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The store is temporarily unable to serve requests
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The caller is sending too many requests
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Credentials do not grant access
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// The store rejected the request itself (bad filter, bad field list)
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The addressed file does not exist
    #[error("File not found: {0}")]
    NotFound(FileId),

    /// Any other status reported by the store
    #[error("Store returned status {status}: {message}")]
    Backend { status: u16, message: String },

    /// The files resource was used after being closed
    #[error("Files resource is closed")]
    Closed,
}

impl Transient for StoreError {
    fn is_transient(&self) -> bool {
        match self {
            StoreError::Timeout(_) | StoreError::Unavailable(_) | StoreError::RateLimited(_) => {
                true
            }
            StoreError::Backend { status, .. } => *status == 429 || (500..600).contains(status),
            StoreError::NotAuthorized(_)
            | StoreError::MalformedRequest(_)
            | StoreError::NotFound(_)
            | StoreError::Closed => false,
        }
    }
}
