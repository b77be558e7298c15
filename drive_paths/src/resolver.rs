//! Path resolution
//!
//! Walks a [`DrivePath`] one level at a time. Each level is a listing of
//! the current folder's children filtered by name; the first match becomes
//! the parent of the next level.

use crate::filter::{name_query, ID_ONLY_FIELDS};
use crate::pages::PageIterator;
use crate::path::DrivePath;
use drive_types::FileId;
use remote_store::{RemoteFileStore, StoreError};
use retry_policy::{RetryingExecutor, Sleeper};
use tracing::debug;

/// Resolves names and paths to file IDs
///
/// Borrows the store and the executor; holds no state of its own, so
/// nothing is cached between calls.
pub struct PathResolver<'a, S: ?Sized, Z> {
    store: &'a S,
    executor: &'a RetryingExecutor<Z>,
}

impl<'a, S, Z> PathResolver<'a, S, Z>
where
    S: RemoteFileStore + ?Sized,
    Z: Sleeper,
{
    /// Creates a resolver over `store`, retrying through `executor`
    pub fn new(store: &'a S, executor: &'a RetryingExecutor<Z>) -> Self {
        Self { store, executor }
    }

    /// Lazily lists the children of `parent` (or everything, if `None`)
    pub fn children(
        &self,
        parent: Option<&FileId>,
        query: Option<&str>,
        fields: Option<&str>,
    ) -> PageIterator<'a, S, Z> {
        PageIterator::new(self.store, self.executor, parent, query, fields)
    }

    /// Finds the child of `parent` named `name`
    ///
    /// Returns `Ok(None)` without touching the store when `parent` is
    /// absent or empty, or `name` is empty. When several children share
    /// the name, the first one in store order wins. An entry without an
    /// `id` counts as no match.
    pub fn id_of(&self, parent: Option<&FileId>, name: &str) -> Result<Option<FileId>, StoreError> {
        let parent = match parent {
            Some(parent) if !parent.is_empty() && !name.is_empty() => parent,
            _ => return Ok(None),
        };

        let query = name_query(name);
        let found = self
            .children(Some(parent), Some(&query), Some(ID_ONLY_FIELDS))
            .next()
            .transpose()?
            .and_then(|entry| entry.id());

        debug!(parent = %parent, name, found = ?found, "looked up child");
        Ok(found)
    }

    /// Resolves `path` starting from `root`
    ///
    /// Issues one lookup per name, strictly in order, and stops at the
    /// first miss. The root path resolves to `root` itself without any
    /// remote call.
    pub fn resolve_path(&self, path: &DrivePath, root: &FileId) -> Result<Option<FileId>, StoreError> {
        if root.is_empty() {
            return Ok(None);
        }

        let mut current = root.clone();
        for (depth, name) in path.names().iter().enumerate() {
            match self.id_of(Some(&current), name)? {
                Some(next) => current = next,
                None => {
                    debug!(path = %path, depth, name = %name, "path does not resolve");
                    return Ok(None);
                }
            }
        }

        Ok(Some(current))
    }
}
