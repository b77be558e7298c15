//! Store traits implemented by backends

use crate::error::StoreError;
use crate::request::{ListPage, ListRequest};
use drive_types::{Entry, FileId};

/// Session-level collaborator
///
/// Owns whatever transport and credentials the backend needs and hands
/// out files resources. Each resource must be closed by its holder.
pub trait DriveBackend {
    /// The files resource type
    type Files: RemoteFileStore;

    /// Acquires a files resource
    fn open_files(&self) -> Result<Self::Files, StoreError>;
}

/// The files resource of a remote store
///
/// Every call may fail transiently (see [`retry_policy::Transient`]);
/// callers are expected to go through a retrying executor.
pub trait RemoteFileStore {
    /// Fetches one page of a listing
    fn list_children(&self, request: &ListRequest) -> Result<ListPage, StoreError>;

    /// Creates a file under `parent` and returns its entry (at least `id`)
    fn create_file(
        &self,
        parent: &FileId,
        name: &str,
        content: &str,
        mime_type: &str,
    ) -> Result<Entry, StoreError>;

    /// Downloads the full content of a file
    fn get_file_content(&self, file_id: &FileId) -> Result<String, StoreError>;

    /// Replaces the content of a file in place
    fn update_file_content(
        &self,
        file_id: &FileId,
        content: &str,
        mime_type: &str,
    ) -> Result<(), StoreError>;

    /// Deletes a file or folder
    fn delete_file(&self, file_id: &FileId) -> Result<(), StoreError>;

    /// Releases the resource
    fn close(&self) -> Result<(), StoreError>;
}
