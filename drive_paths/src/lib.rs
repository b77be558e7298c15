//! # Drive Paths
//!
//! Hierarchical paths over a flat, ID-addressed remote store.
//!
//! ## Philosophy
//!
//! - **Paths are views, not identities**: A path is only ever turned into an
//!   ID by asking the store, one level at a time
//! - **Misses are answers, not errors**: A name that does not exist resolves
//!   to `None`
//! - **Listings are pulled, never pushed**: Pages are fetched only when the
//!   consumer asks for the next entry
//!
//! ## Design
//!
//! - [`DrivePath`]: Ordered names, resolved left to right from a root ID
//! - [`filter`]: Builds the store's filter expressions and field projections
//! - [`PageIterator`]: Lazy, single-pass listing across result pages
//! - [`PathResolver`]: Single-level lookups and whole-path resolution
//!
//! Names are interpolated into filter expressions verbatim. A name
//! containing `'` produces a malformed (or wrong) filter; callers that
//! accept arbitrary names must vet them first.

pub mod filter;
pub mod pages;
pub mod path;
pub mod resolver;

pub use pages::PageIterator;
pub use path::{DrivePath, PathError};
pub use resolver::PathResolver;
