//! Documentation content model and resolution for Folio.
//!
//! A documentation source is a directory tree. Directories are categories,
//! content files (`.mdx` by default) are documents carrying YAML front-matter.
//! [`DocsResolver`] turns such a tree into ordered [`Category`] values and
//! answers route lookups against it:
//!
//! - [`DocsResolver::all_docs`] builds the full tree
//! - [`DocsResolver::doc_by_path`] finds a document by slug path
//! - [`DocsResolver::category_index`] returns a category's landing page,
//!   synthesizing one when the category has no authored index
//! - [`DocsResolver::all_doc_paths`] lists every document route
//!
//! Tree traversals that need no storage access ([`flatten_categories`],
//! [`find_category`], [`category_paths`], [`collect_doc_paths`]) are plain
//! functions over a resolved tree, as is [`filter_categories`] for search.

mod category;
mod error;
pub mod frontmatter;
mod index;
mod model;
mod resolver;
mod tree;

pub use category::{CategoryConfig, derive_category_name};
pub use error::DocsError;
pub use frontmatter::FrontMatterError;
pub use model::{Category, DocPathEntry, Document, Page};
pub use resolver::{DocsResolver, ResolverConfig};
pub use tree::{
    category_paths, collect_doc_paths, filter_categories, find_category, flatten_categories,
};
