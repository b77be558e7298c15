//! # Drive Types
//!
//! This crate defines the value types shared by every layer of drivepath.
//!
//! ## Philosophy
//!
//! - **Identifiers are opaque**: A [`FileId`] is compared, never parsed
//! - **Entries are open records**: An [`Entry`] carries whatever projection the caller asked for
//! - **Nothing is cached**: Every value here is built per call from a store response
//!
//! ## Key Types
//!
//! - [`FileId`]: Identifier of a remote file or folder, with the reserved `root` value
//! - [`PageToken`]: Opaque cursor for the next slice of a listing
//! - [`Entry`]: Field map describing one remote file or folder

pub mod entry;
pub mod ids;

pub use entry::Entry;
pub use ids::{FileId, PageToken};
