//! # Remote Store
//!
//! This crate defines the boundary to the remote file store.
//!
//! ## Philosophy
//!
//! The store is flat and ID-addressed. It has no notion of paths, only of
//! files whose `parents` list other files. Everything path-shaped is built
//! above this boundary.
//!
//! ## Design
//!
//! - [`DriveBackend`]: Session-level collaborator that hands out files resources
//! - [`RemoteFileStore`]: The files resource: list, create, read, update, delete, close
//! - [`StoreError`]: Failures, classified as transient or not for the retry layer
//! - [`InMemoryDrive`]: Deterministic simulated backend for tests and demos
//! - [`FailingStore`]: Wrapper that injects failures according to a [`FailurePolicy`]

pub mod error;
pub mod failing_store;
pub mod memory;
pub mod request;
pub mod store;

pub use error::StoreError;
pub use failing_store::{FailingStore, FailurePolicy};
pub use memory::{InMemoryDrive, InMemoryFiles, StoreCall, StoredFile, FOLDER_MIME_TYPE};
pub use request::{ListPage, ListRequest, DRIVE_SPACE};
pub use store::{DriveBackend, RemoteFileStore};
