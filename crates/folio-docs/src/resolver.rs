//! Documentation tree resolution.
//!
//! [`DocsResolver`] walks a [`Storage`] backend and turns its directory layout
//! into a [`Category`] tree:
//!
//! - every non-hidden directory is a category (`_`-prefixed ones are hidden)
//! - every file with the content extension is a [`Document`]
//! - `_category.json` supplies a category's display name and order
//! - `_index.mdx` is the category's landing page, synthesized when missing
//!
//! # Caching
//!
//! There is none. Every public method rebuilds what it needs from storage, so
//! results always reflect the content as of the call. The resolver holds no
//! mutable state and can be shared freely between threads.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use folio_docs::{DocsResolver, ResolverConfig};
//! use folio_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let resolver = DocsResolver::new(storage, ResolverConfig::default());
//!
//! let tree = resolver.all_docs()?;
//! let setup = resolver.doc_by_path(&["getting-started", "setup"])?;
//! ```

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use folio_storage::{Entry, Storage, join_path};

use crate::category::CategoryConfig;
use crate::error::DocsError;
use crate::frontmatter;
use crate::index::synthesize_index;
use crate::model::{Category, DocPathEntry, Document, Page};
use crate::tree::{category_paths, collect_doc_paths, find_category};

/// Naming conventions used when reading the content tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Content file extension, without the dot.
    pub extension: String,
    /// File name of the per-directory category config.
    pub category_file: String,
    /// Reserved slug addressing a category's index page.
    pub index_slug: String,
    /// URL prefix for links in synthesized index pages.
    pub link_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extension: "mdx".to_owned(),
            category_file: "_category.json".to_owned(),
            index_slug: "_index".to_owned(),
            link_prefix: "/docs".to_owned(),
        }
    }
}

impl ResolverConfig {
    /// File name of a category's authored index page (e.g. `_index.mdx`).
    #[must_use]
    pub fn index_file(&self) -> String {
        format!("{}.{}", self.index_slug, self.extension)
    }

    /// Slug of a content file, or `None` if the name lacks the content extension.
    fn content_slug<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')
    }
}

/// True for directories that form categories.
fn is_category_dir(entry: &Entry) -> bool {
    entry.is_dir() && !entry.name.starts_with('_')
}

/// Last segment of a storage path.
fn dir_name(dir: &str) -> &str {
    dir.rsplit('/').next().unwrap_or(dir)
}

/// Resolves the documentation tree from storage.
pub struct DocsResolver {
    storage: Arc<dyn Storage>,
    config: ResolverConfig,
}

impl DocsResolver {
    /// Create a resolver over `storage`, rooted at the content directory.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: ResolverConfig) -> Self {
        Self { storage, config }
    }

    /// Build the full category tree.
    ///
    /// Top-level categories are the root's non-hidden subdirectories, sorted
    /// by `order` (listing order breaks ties). Files directly in the root are
    /// not part of any category and are ignored.
    pub fn all_docs(&self) -> Result<Vec<Category>, DocsError> {
        let mut categories = self
            .storage
            .list("")?
            .iter()
            .filter(|entry| is_category_dir(entry))
            .map(|entry| self.resolve_category(&entry.name))
            .collect::<Result<Vec<_>, _>>()?;
        categories.sort_by_key(|c| c.order);
        Ok(categories)
    }

    /// Display name and order for the category at `dir`.
    ///
    /// Never fails: a missing, unreadable or malformed config file falls back
    /// to [`CategoryConfig::derived`].
    pub fn category_config(&self, dir: &str) -> CategoryConfig {
        let name = dir_name(dir);
        let path = join_path(dir, &self.config.category_file);

        match self.storage.read(&path) {
            Ok(content) => CategoryConfig::parse(&content, name).unwrap_or_else(|| {
                tracing::debug!(%path, "Malformed category config, deriving name");
                CategoryConfig::derived(name)
            }),
            Err(e) => {
                tracing::debug!(%path, error = %e, "No category config, deriving name");
                CategoryConfig::derived(name)
            }
        }
    }

    /// Resolve the category at storage path `dir`, recursively.
    ///
    /// # Errors
    ///
    /// Fails if a directory cannot be listed, a content file cannot be read,
    /// or a content file has malformed front-matter.
    pub fn resolve_category(&self, dir: &str) -> Result<Category, DocsError> {
        let entries = self.storage.list(dir)?;
        let config = self.category_config(dir);
        let index_file = self.config.index_file();

        let mut items = Vec::new();
        let mut categories = Vec::new();

        for entry in &entries {
            let path = join_path(dir, &entry.name);
            if is_category_dir(entry) {
                categories.push(self.resolve_category(&path)?);
            } else if entry.is_file()
                && entry.name != index_file
                && let Some(slug) = self.config.content_slug(&entry.name)
            {
                items.push(self.read_document(&path, slug)?);
            }
        }

        items.sort_by_key(|doc| doc.order);
        categories.sort_by_key(|c| c.order);

        tracing::debug!(
            dir,
            items = items.len(),
            categories = categories.len(),
            "Resolved category"
        );

        Ok(Category {
            name: config.name,
            slug: dir_name(dir).to_owned(),
            order: config.order,
            items,
            categories: (!categories.is_empty()).then_some(categories),
        })
    }

    /// Look up a document by route segments.
    ///
    /// All segments but the last are category slugs, the last is a document
    /// slug. If the last segment is the index slug, the category's index page
    /// is returned instead (see [`category_index`](Self::category_index)).
    /// Returns `Ok(None)` when nothing matches.
    pub fn doc_by_path<S: AsRef<str>>(&self, path: &[S]) -> Result<Option<Document>, DocsError> {
        let categories = self.all_docs()?;
        Ok(self.lookup_doc(&categories, path))
    }

    /// Index page of the category at `category_path`.
    ///
    /// Returns the authored index file if it exists and parses, otherwise a
    /// synthesized one. Returns `Ok(None)` only if the category itself does
    /// not exist.
    pub fn category_index<S: AsRef<str>>(
        &self,
        category_path: &[S],
    ) -> Result<Option<Document>, DocsError> {
        let categories = self.all_docs()?;
        Ok(find_category(&categories, category_path)
            .map(|category| self.index_for(category, category_path)))
    }

    /// Every document route, depth-first.
    pub fn all_doc_paths(&self) -> Result<Vec<DocPathEntry>, DocsError> {
        Ok(collect_doc_paths(&self.all_docs()?))
    }

    /// Every route a static build needs: each document (category slugs plus
    /// document slug), then each category.
    pub fn static_routes(&self) -> Result<Vec<Vec<String>>, DocsError> {
        let categories = self.all_docs()?;
        let mut routes: Vec<Vec<String>> = collect_doc_paths(&categories)
            .iter()
            .map(DocPathEntry::segments)
            .collect();
        routes.extend(category_paths(&categories));
        Ok(routes)
    }

    /// Resolve a docs route to the page it displays.
    ///
    /// A route naming a category yields its index page; anything else is
    /// looked up as a document.
    pub fn resolve_page<S: AsRef<str>>(&self, path: &[S]) -> Result<Option<Page>, DocsError> {
        let categories = self.all_docs()?;
        if let Some(category) = find_category(&categories, path) {
            return Ok(Some(Page::Category {
                path: path.iter().map(|s| s.as_ref().to_owned()).collect(),
                document: self.index_for(category, path),
            }));
        }

        Ok(self
            .lookup_doc(&categories, path)
            .map(|document| Page::Document { document }))
    }

    /// Read a single document directly, without building the tree.
    ///
    /// `category` is a `/`-separated category path; a trailing content
    /// extension on `slug` is ignored.
    ///
    /// # Errors
    ///
    /// Unlike the tree lookups, a missing file is an error here.
    pub fn doc_by_slug(&self, category: &str, slug: &str) -> Result<Document, DocsError> {
        let slug = self.config.content_slug(slug).unwrap_or(slug);
        let path = join_path(category, &format!("{slug}.{}", self.config.extension));
        self.read_document(&path, slug)
    }

    /// Document lookup against an already resolved tree.
    fn lookup_doc<S: AsRef<str>>(&self, categories: &[Category], path: &[S]) -> Option<Document> {
        let (last, parents) = path.split_last()?;
        if last.as_ref() == self.config.index_slug {
            return find_category(categories, parents).map(|c| self.index_for(c, parents));
        }
        find_category(categories, parents)
            .and_then(|category| category.item(last.as_ref()))
            .cloned()
    }

    /// Read and parse one content file.
    fn read_document(&self, path: &str, slug: &str) -> Result<Document, DocsError> {
        let raw = self.storage.read(path)?;
        let parsed = frontmatter::parse(&raw).map_err(|source| DocsError::FrontMatter {
            path: path.to_owned(),
            source,
        })?;
        Ok(Document::from_parts(
            parsed.front_matter,
            parsed.body,
            slug.to_owned(),
        ))
    }

    /// Authored or synthesized index page for a resolved category.
    fn index_for<S: AsRef<str>>(&self, category: &Category, category_path: &[S]) -> Document {
        let dir = category_path
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        let path = join_path(&dir, &self.config.index_file());

        match self.read_document(&path, &self.config.index_slug) {
            Ok(mut index) => {
                if index.title.is_empty() {
                    index.title.clone_from(&category.name);
                }
                index
            }
            Err(e) => {
                tracing::debug!(%path, error = %e, "No usable index page, synthesizing");
                synthesize_index(
                    category,
                    category_path,
                    &self.config.link_prefix,
                    &self.config.index_slug,
                    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                )
            }
        }
    }
}
