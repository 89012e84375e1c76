//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for listing and reading content below a root
//! directory on the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// All storage paths are resolved against `source_dir`, which is fixed at
/// construction time. Directory listings are sorted by entry name so that the
/// order is the same on every platform.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use folio_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let body = storage.read("getting-started/setup.mdx")?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root directory for content.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory this storage reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a storage path stays inside the content root.
    ///
    /// Rejects absolute paths and `..` segments.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        if path.starts_with('/') || path.split('/').any(|segment| segment == "..") {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Map a storage path to a filesystem path.
    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.source_dir.clone(), |acc, segment| acc.join(segment))
    }

    fn io_error(err: std::io::Error, path: &str) -> StorageError {
        StorageError::io(err, Some(PathBuf::from(path))).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn list(&self, dir: &str) -> Result<Vec<Entry>, StorageError> {
        Self::validate_path(dir)?;
        let read_dir = fs::read_dir(self.resolve(dir)).map_err(|e| Self::io_error(e, dir))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| Self::io_error(e, dir))?;
            // DirEntry::file_type does not follow symlinks
            let kind = match entry.file_type() {
                Ok(t) if t.is_dir() => EntryKind::Directory,
                Ok(t) if t.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            };
            entries.push(Entry::new(entry.file_name().to_string_lossy(), kind));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::trace!(dir, count = entries.len(), "Listed directory");
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        fs::read_to_string(self.resolve(path)).map_err(|e| Self::io_error(e, path))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_list_empty_dir() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let entries = storage.list("").unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn test_list_missing_dir() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent"));
        let err = storage.list("").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_list_sorted_with_kinds() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("zeta")).unwrap();
        fs::create_dir(temp_dir.path().join("alpha")).unwrap();
        fs::write(temp_dir.path().join("middle.mdx"), "body").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let entries = storage.list("").unwrap();

        assert_eq!(
            entries,
            vec![
                Entry::new("alpha", EntryKind::Directory),
                Entry::new("middle.mdx", EntryKind::File),
                Entry::new("zeta", EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn test_list_nested_dir() {
        let temp_dir = create_test_dir();
        let nested = temp_dir.path().join("guides").join("advanced");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("tuning.mdx"), "body").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let entries = storage.list("guides/advanced").unwrap();

        assert_eq!(entries, vec![Entry::new("tuning.mdx", EntryKind::File)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_reports_symlinks_as_other() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("link"))
            .unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let entries = storage.list("").unwrap();

        assert_eq!(entries[0], Entry::new("link", EntryKind::Other));
        assert_eq!(entries[1], Entry::new("real", EntryKind::Directory));
    }

    #[test]
    fn test_read_existing_file() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("api")).unwrap();
        fs::write(temp_dir.path().join("api").join("auth.mdx"), "# Auth").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.read("api/auth.mdx").unwrap(), "# Auth");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read("missing.mdx").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.path.as_deref(), Some(Path::new("missing.mdx")));
    }

    #[test]
    fn test_read_rejects_path_traversal() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read("../secret.mdx").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_read_rejects_nested_path_traversal() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(
            storage.list("api/../../etc").unwrap_err().kind,
            StorageErrorKind::InvalidPath
        );
        assert_eq!(
            storage.read("/etc/passwd").unwrap_err().kind,
            StorageErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_read_allows_dots_inside_names() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("v1..2.mdx"), "body").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.read("v1..2.mdx").unwrap(), "body");
    }
}
