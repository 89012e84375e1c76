//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind, join_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores files in memory. Directories are created implicitly for every
/// ancestor of an added file and are listed in insertion order, which makes
/// tie-break behavior observable in tests.
///
/// # Example
///
/// ```ignore
/// use folio_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("api/auth.mdx", "---\ntitle: Auth\n---\nBody")
///     .with_dir("api/_drafts");
///
/// let entries = storage.list("api").unwrap();
/// ```
#[derive(Debug)]
pub struct MockStorage {
    dirs: RwLock<HashMap<String, Vec<Entry>>>,
    files: RwLock<HashMap<String, String>>,
    failures: RwLock<HashMap<String, StorageErrorKind>>,
}

impl Default for MockStorage {
    fn default() -> Self {
        let mut dirs = HashMap::new();
        dirs.insert(String::new(), Vec::new());
        Self {
            dirs: RwLock::new(dirs),
            files: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
        }
    }
}

impl MockStorage {
    /// Create a new mock storage with an empty root directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.register(&path, EntryKind::File);
        self.files.write().unwrap().insert(path, content.into());
        self
    }

    /// Add an (empty) directory, creating parent directories.
    #[must_use]
    pub fn with_dir(self, path: impl Into<String>) -> Self {
        self.register(&path.into(), EntryKind::Directory);
        self
    }

    /// Add a directory entry of kind [`EntryKind::Other`] (e.g. a symlink).
    #[must_use]
    pub fn with_other(self, path: impl Into<String>) -> Self {
        self.register(&path.into(), EntryKind::Other);
        self
    }

    /// Make every `list` or `read` of `path` fail with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, path: impl Into<String>, kind: StorageErrorKind) -> Self {
        self.failures.write().unwrap().insert(path.into(), kind);
        self
    }

    /// Insert `path` into its parent listings, creating ancestors as needed.
    fn register(&self, path: &str, kind: EntryKind) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut dirs = self.dirs.write().unwrap();
        let mut current = String::new();

        for (i, segment) in segments.iter().enumerate() {
            let entry_kind = if i + 1 == segments.len() {
                kind
            } else {
                EntryKind::Directory
            };

            let listing = dirs.entry(current.clone()).or_default();
            if !listing.iter().any(|e| e.name == *segment) {
                listing.push(Entry::new(*segment, entry_kind));
            }

            current = join_path(&current, segment);
            if entry_kind == EntryKind::Directory {
                dirs.entry(current.clone()).or_default();
            }
        }
    }

    fn check_failure(&self, path: &str) -> Result<(), StorageError> {
        match self.failures.read().unwrap().get(path) {
            Some(kind) => Err(StorageError::new(*kind)
                .with_path(path)
                .with_backend(BACKEND)),
            None => Ok(()),
        }
    }
}

impl Storage for MockStorage {
    fn list(&self, dir: &str) -> Result<Vec<Entry>, StorageError> {
        self.check_failure(dir)?;
        self.dirs
            .read()
            .unwrap()
            .get(dir)
            .cloned()
            .ok_or_else(|| StorageError::not_found(dir).with_backend(BACKEND))
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.check_failure(path)?;
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}
