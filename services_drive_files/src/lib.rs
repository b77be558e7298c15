//! # Drive Files Service
//!
//! Path-addressed file operations over an ID-addressed remote store.
//!
//! ## Philosophy
//!
//! - Every remote call goes through a retrying executor
//! - A name that does not resolve is a normal "not found", never an error
//! - Writes are upserts keyed on name within parent
//! - Nothing is cached; every call asks the store again
//! - The files resource is released on every exit path
//!
//! ## Operations
//!
//! - `list(target, query, fields)`: List a folder's children, or everything
//! - `read(target, name)`: Read a file's content by name under a folder
//! - `write(target, name, content, mime_type)`: Update or create a file
//! - `delete_file_id(id)`: Delete a file or folder
//!
//! ## Example
//!
//! ```
//! use drive_paths::DrivePath;
//! use remote_store::InMemoryDrive;
//! use services_drive_files::{DriveSession, FileOperations, PathOrId};
//!
//! let drive = InMemoryDrive::new();
//! let root = drive_types::FileId::root();
//! let folder_a = drive.add_folder(&root, "folderA");
//! drive.add_folder(&folder_a, "subfolder1");
//!
//! let session = DriveSession::new(drive);
//! let content = session
//!     .with_files(|files| {
//!         let target = PathOrId::from(DrivePath::from_names(["folderA", "subfolder1"]));
//!         files.write(&target, "filename.txt", "hello", "text/plain")?;
//!         files.read(&target, "filename.txt")
//!     })
//!     .unwrap();
//! assert_eq!(content.as_deref(), Some("hello"));
//! ```

pub mod config;
pub mod files;
pub mod operations;
pub mod session;

pub use config::{ConfigError, DriveConfig, RetryConfig};
pub use files::DriveFiles;
pub use operations::{FileOperations, FilesError, PathOrId};
pub use session::{DriveSession, SCOPE};
