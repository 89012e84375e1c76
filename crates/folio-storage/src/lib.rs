//! Storage abstraction for the Folio documentation engine.
//!
//! This crate provides a [`Storage`] trait that hides where documentation content
//! lives. The resolver in `folio-docs` only ever lists directories and reads files
//! through it, which enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Deterministic listing order** in tests (see [`MockStorage`])
//! - **Explicit content roots** instead of the process working directory
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list()` and `read()` methods
//! - [`FsStorage`] implementation rooted at a directory on disk
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for entry in storage.list("")? {
//!     println!("{} ({:?})", entry.name, entry.kind);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind, join_path};
