//! Entry records describing remote files and folders

use crate::ids::FileId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single file or folder as returned by a listing
///
/// An entry is an open map from field name to value. Which fields are
/// present depends on the projection the caller requested; `id` is the
/// only field consumers may rely on, and only where the entry is used as
/// a lookup result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(Map<String, Value>);

impl Entry {
    /// Creates an empty entry
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Creates an entry holding only an `id` field
    pub fn with_id(id: &FileId) -> Self {
        let mut entry = Self::new();
        entry.insert("id", Value::String(id.as_str().to_string()));
        entry
    }

    /// Wraps an existing field map
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the `id` field, if present and a string
    pub fn id(&self) -> Option<FileId> {
        self.get_str("id").map(FileId::new)
    }

    /// Returns the `name` field, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Gets a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Gets a field value as a string slice
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Sets a field, returning the previous value
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Builder-style variant of [`Entry::insert`]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Returns true if the field is present
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of fields in the entry
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the entry has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying field map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the entry and returns the underlying field map
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Entry {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
