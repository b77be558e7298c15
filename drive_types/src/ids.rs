//! Identifiers handed out by the remote store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a file or folder in the remote store
///
/// The store assigns these; nothing is assumed about their shape beyond
/// equality. The value `"root"` is reserved by the store for the top-level
/// folder of the drive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Well-known identifier of the drive's root folder
    pub const ROOT: &'static str = "root";

    /// Creates a file ID from a store-issued string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the reserved root folder ID
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the reserved root ID
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// Returns true if the ID is the empty string
    ///
    /// An empty ID never names anything; lookups treat it like a missing parent.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the ID and returns the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for FileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Cursor returned by the store when more pages of a listing remain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Creates a page token from the store's cursor string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}
