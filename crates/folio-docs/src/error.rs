//! Resolver error type.

use folio_storage::StorageError;

use crate::frontmatter::FrontMatterError;

/// Error returned when the documentation tree cannot be built.
///
/// Lookups that simply find nothing are not errors; they return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// Listing a directory or reading a content file failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A content file has front-matter that cannot be parsed.
    #[error("Invalid front-matter in {path}: {source}")]
    FrontMatter {
        /// Storage path of the content file.
        path: String,
        #[source]
        source: FrontMatterError,
    },
}
