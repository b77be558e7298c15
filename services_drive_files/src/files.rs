//! Drive files handle
//!
//! Owns a files resource from the remote store together with the retry
//! policy applied to every call made through it.

use crate::operations::{FileOperations, FilesError, PathOrId};
use drive_paths::{DrivePath, PageIterator, PathResolver};
use drive_types::{Entry, FileId};
use remote_store::RemoteFileStore;
use retry_policy::{RetryPolicy, RetryingExecutor, Sleeper, ThreadSleeper};
use tracing::{debug, info, warn};

/// Handle for file operations on one files resource
///
/// The resource is released exactly once: by [`DriveFiles::close`], or on
/// drop if `close` was never called. Prefer
/// [`crate::DriveSession::with_files`], which scopes the handle to a
/// closure.
pub struct DriveFiles<F: RemoteFileStore, Z: Sleeper = ThreadSleeper> {
    store: F,
    executor: RetryingExecutor<Z>,
    closed: bool,
}

impl<F: RemoteFileStore> DriveFiles<F> {
    /// Wraps a files resource, sleeping the thread between retries
    pub fn new(store: F, policy: RetryPolicy) -> Self {
        Self::with_executor(store, RetryingExecutor::new(policy))
    }
}

impl<F: RemoteFileStore, Z: Sleeper> DriveFiles<F, Z> {
    /// Wraps a files resource with an explicit executor
    pub fn with_executor(store: F, executor: RetryingExecutor<Z>) -> Self {
        Self {
            store,
            executor,
            closed: false,
        }
    }

    /// The retry policy of this handle
    pub fn policy(&self) -> &RetryPolicy {
        self.executor.policy()
    }

    /// The executor every call goes through
    pub fn executor(&self) -> &RetryingExecutor<Z> {
        &self.executor
    }

    /// The underlying files resource
    pub fn store(&self) -> &F {
        &self.store
    }

    /// A resolver borrowing this handle's store and executor
    pub fn resolver(&self) -> PathResolver<'_, F, Z> {
        PathResolver::new(&self.store, &self.executor)
    }

    /// Lazily iterates the children of `parent` (or the whole drive)
    pub fn each_files(
        &self,
        parent: Option<&FileId>,
        query: Option<&str>,
        fields: Option<&str>,
    ) -> PageIterator<'_, F, Z> {
        self.resolver().children(parent, query, fields)
    }

    /// Resolves `path` from `root` to a file ID
    pub fn get_path_id(&self, path: &DrivePath, root: &FileId) -> Result<Option<FileId>, FilesError> {
        Ok(self.resolver().resolve_path(path, root)?)
    }

    /// Finds the child of `parent` named `name`
    pub fn get_id(&self, parent: Option<&FileId>, name: &str) -> Result<Option<FileId>, FilesError> {
        Ok(self.resolver().id_of(parent, name)?)
    }

    /// Creates a file and returns its ID
    pub fn create_file(
        &self,
        parent: &FileId,
        name: &str,
        content: &str,
        mime_type: &str,
    ) -> Result<FileId, FilesError> {
        let entry = self
            .executor
            .execute(|| self.store.create_file(parent, name, content, mime_type))?;
        let id = entry.id().ok_or(FilesError::MissingId)?;
        info!(parent = %parent, name, id = %id, "created file");
        Ok(id)
    }

    /// Reads the full content of a file
    pub fn read_file_id(&self, file_id: &FileId) -> Result<String, FilesError> {
        Ok(self
            .executor
            .execute(|| self.store.get_file_content(file_id))?)
    }

    /// Replaces the content of a file
    pub fn update_file_id(
        &self,
        file_id: &FileId,
        content: &str,
        mime_type: &str,
    ) -> Result<(), FilesError> {
        self.executor
            .execute(|| self.store.update_file_content(file_id, content, mime_type))?;
        info!(id = %file_id, mime_type, "updated file");
        Ok(())
    }

    /// Releases the files resource
    pub fn close(mut self) -> Result<(), FilesError> {
        self.release()
    }

    /// Resolves the folder a read or write addresses
    fn parent_id(&self, target: &PathOrId) -> Result<Option<FileId>, FilesError> {
        match target {
            PathOrId::Id(id) => Ok(Some(id.clone())),
            PathOrId::Path(path) => self.get_path_id(path, &FileId::root()),
        }
    }

    fn release(&mut self) -> Result<(), FilesError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.store.close()?;
        debug!("closed files resource");
        Ok(())
    }
}

impl<F: RemoteFileStore, Z: Sleeper> FileOperations for DriveFiles<F, Z> {
    fn list(
        &self,
        target: Option<&PathOrId>,
        query: Option<&str>,
        fields: Option<&str>,
    ) -> Result<Vec<Entry>, FilesError> {
        let parent = match target {
            None => None,
            Some(PathOrId::Id(id)) => Some(id.clone()),
            Some(PathOrId::Path(path)) => match self.get_path_id(path, &FileId::root())? {
                Some(id) => Some(id),
                None => return Ok(Vec::new()),
            },
        };

        let entries = self
            .each_files(parent.as_ref(), query, fields)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn read(&self, target: &PathOrId, name: &str) -> Result<Option<String>, FilesError> {
        let parent = self.parent_id(target)?;
        match self.get_id(parent.as_ref(), name)? {
            Some(file_id) => Ok(Some(self.read_file_id(&file_id)?)),
            None => Ok(None),
        }
    }

    fn write(
        &self,
        target: &PathOrId,
        name: &str,
        content: &str,
        mime_type: &str,
    ) -> Result<FileId, FilesError> {
        let parent = self
            .parent_id(target)?
            .filter(|id| !id.is_empty())
            .ok_or_else(|| FilesError::ParentNotFound(target.to_string()))?;

        match self.get_id(Some(&parent), name)? {
            Some(file_id) => {
                self.update_file_id(&file_id, content, mime_type)?;
                Ok(file_id)
            }
            None => self.create_file(&parent, name, content, mime_type),
        }
    }

    fn delete_file_id(&self, file_id: &FileId) -> Result<(), FilesError> {
        self.executor.execute(|| self.store.delete_file(file_id))?;
        info!(id = %file_id, "deleted file");
        Ok(())
    }
}

impl<F: RemoteFileStore, Z: Sleeper> Drop for DriveFiles<F, Z> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(error = %err, "failed to close files resource");
        }
    }
}
