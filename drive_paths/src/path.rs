//! Path parsing
//!
//! This module handles turning user input into name sequences.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing a path
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// Path is empty or invalid
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Ordered sequence of names, resolved left to right from a root folder
///
/// A path never carries identifiers; those only come out of resolution.
/// The empty path denotes the root folder itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrivePath {
    names: Vec<String>,
}

impl DrivePath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from names, verbatim
    ///
    /// No validation is done; an empty name is allowed and simply never
    /// resolves.
    pub fn from_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a slash-separated path
    ///
    /// # Examples
    ///
    /// ```
    /// use drive_paths::DrivePath;
    ///
    /// let path = DrivePath::parse("folderA/subfolder1").unwrap();
    /// assert_eq!(path.names(), ["folderA", "subfolder1"]);
    ///
    /// let path = DrivePath::parse("/reports/").unwrap();
    /// assert_eq!(path.names(), ["reports"]);
    /// ```
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let path = path.trim_matches('/');

        if path.is_empty() {
            return Err(PathError::InvalidPath("Empty path".to_string()));
        }

        let mut names = Vec::new();
        for component in path.split('/') {
            if component.is_empty() {
                return Err(PathError::InvalidPath(
                    "Path contains empty component".to_string(),
                ));
            }
            if component == "." || component == ".." {
                return Err(PathError::InvalidPath(
                    "Relative path components (. or ..) are not supported".to_string(),
                ));
            }
            names.push(component.to_string());
        }

        Ok(Self { names })
    }

    /// Returns a new path with `name` appended
    pub fn join(&self, name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.push(name.into());
        Self { names }
    }

    /// The names, in resolution order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true for the root path
    pub fn is_root(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for DrivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.names.join("/"))
    }
}

impl<N: Into<String>> FromIterator<N> for DrivePath {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_path() {
        let path = DrivePath::parse("todo.txt").unwrap();
        assert_eq!(path.names(), ["todo.txt"]);
    }

    #[test]
    fn test_parse_nested_path() {
        let path = DrivePath::parse("docs/notes/todo.txt").unwrap();
        assert_eq!(path.names(), ["docs", "notes", "todo.txt"]);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_parse_strips_outer_slashes() {
        assert_eq!(DrivePath::parse("/docs/notes.txt").unwrap().len(), 2);
        assert_eq!(DrivePath::parse("docs/").unwrap().names(), ["docs"]);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            DrivePath::parse(""),
            Err(PathError::InvalidPath(_))
        ));
        assert!(matches!(
            DrivePath::parse("///"),
            Err(PathError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_parse_rejects_double_slash() {
        assert!(DrivePath::parse("docs//notes.txt").is_err());
    }

    #[test]
    fn test_parse_rejects_relative_components() {
        assert!(DrivePath::parse("docs/./notes.txt").is_err());
        assert!(DrivePath::parse("docs/../notes.txt").is_err());
    }

    #[test]
    fn test_from_names_keeps_empty_names() {
        let path = DrivePath::from_names(["a", "", "c"]);
        assert_eq!(path.names(), ["a", "", "c"]);
    }

    #[test]
    fn test_root_and_join() {
        let root = DrivePath::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "/");

        let path = root.join("a").join("b");
        assert_eq!(path.to_string(), "/a/b");
        assert!(!path.is_root());
    }

    #[test]
    fn test_collect_into_path() {
        let path: DrivePath = vec!["x", "y"].into_iter().collect();
        assert_eq!(path, DrivePath::from_names(["x", "y"]));
    }
}
