//! File operations
//!
//! This module defines the operations provided by the drive files service.

use crate::config::ConfigError;
use drive_paths::{DrivePath, PathError};
use drive_types::{Entry, FileId};
use remote_store::StoreError;
use thiserror::Error;

/// Errors that can occur during file operations
///
/// A name or path that does not resolve is not an error; operations
/// report it as `None` or an empty listing.
#[derive(Debug, Error)]
pub enum FilesError {
    /// Remote store error, after retries where applicable
    #[error("Remote store error: {0}")]
    Store(#[from] StoreError),

    /// The folder a write targets does not exist
    #[error("Parent folder not found: {0}")]
    ParentNotFound(String),

    /// The store answered a create without an ID
    #[error("Store returned an entry without an id")]
    MissingId,

    /// Path parsing error
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Addresses a folder either directly or by path from the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOrId {
    /// A raw file ID
    Id(FileId),
    /// Names resolved from the root folder
    Path(DrivePath),
}

impl PathOrId {
    /// Parses a slash-separated path from the root
    pub fn parse_path(path: &str) -> Result<Self, PathError> {
        DrivePath::parse(path).map(PathOrId::Path)
    }
}

impl From<FileId> for PathOrId {
    fn from(id: FileId) -> Self {
        PathOrId::Id(id)
    }
}

impl From<DrivePath> for PathOrId {
    fn from(path: DrivePath) -> Self {
        PathOrId::Path(path)
    }
}

impl std::fmt::Display for PathOrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathOrId::Id(id) => write!(f, "id:{}", id),
            PathOrId::Path(path) => write!(f, "{}", path),
        }
    }
}

/// File operations trait
///
/// This trait defines the path-addressed operations of the service.
pub trait FileOperations {
    /// List folder contents
    ///
    /// `None` lists across the whole drive with no parent filter. The root
    /// path lists the children of the root folder. A path that does not
    /// resolve lists nothing.
    fn list(
        &self,
        target: Option<&PathOrId>,
        query: Option<&str>,
        fields: Option<&str>,
    ) -> Result<Vec<Entry>, FilesError>;

    /// Read the content of the file `name` under `target`
    ///
    /// Returns `None` if the folder or the file does not exist.
    fn read(&self, target: &PathOrId, name: &str) -> Result<Option<String>, FilesError>;

    /// Write the content of the file `name` under `target`
    ///
    /// Overwrites the file if it exists, creates it otherwise. Returns the
    /// file's ID either way.
    fn write(
        &self,
        target: &PathOrId,
        name: &str,
        content: &str,
        mime_type: &str,
    ) -> Result<FileId, FilesError>;

    /// Delete a file or folder
    fn delete_file_id(&self, file_id: &FileId) -> Result<(), FilesError>;
}
