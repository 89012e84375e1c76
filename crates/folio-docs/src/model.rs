//! Documentation content model.
//!
//! The tree is plain owned data: a [`Category`] owns its documents and nested
//! categories, and every resolver call builds a fresh tree.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::frontmatter::FrontMatter;

/// Words per minute used for reading time estimates.
const WORDS_PER_MINUTE: usize = 200;

/// A single content file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    /// Title from front-matter (empty if missing).
    pub title: String,
    /// Description from front-matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Date string from front-matter (empty if missing).
    pub date: String,
    /// Sort key among siblings.
    pub order: i64,
    /// File name without extension.
    pub slug: String,
    /// Body text after the front-matter block.
    pub content: String,
    /// Front-matter keys other than the recognized ones.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Document {
    /// Build a document from parsed front-matter and body.
    pub(crate) fn from_parts(front_matter: FrontMatter, content: String, slug: String) -> Self {
        Self {
            title: front_matter.title.unwrap_or_default(),
            description: front_matter.description.filter(|d| !d.is_empty()),
            date: front_matter.date.unwrap_or_default(),
            order: front_matter.order.unwrap_or(0),
            slug,
            content,
            extra: front_matter.extra,
        }
    }

    /// Estimated reading time in minutes.
    ///
    /// Counts space-separated chunks of the body, 200 per minute, rounded up.
    /// An empty body still counts as one minute.
    #[must_use]
    pub fn reading_minutes(&self) -> usize {
        self.content.split(' ').count().div_ceil(WORDS_PER_MINUTE)
    }
}

/// A directory-backed node of the documentation tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Category {
    /// Display name from the category config or derived from the directory name.
    pub name: String,
    /// Directory name.
    pub slug: String,
    /// Sort key among siblings.
    pub order: i64,
    /// Documents, sorted by `order`.
    pub items: Vec<Document>,
    /// Nested categories, sorted by `order`. `None` if the directory has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
}

impl Category {
    /// Nested categories, or an empty slice.
    #[must_use]
    pub fn subcategories(&self) -> &[Category] {
        self.categories.as_deref().unwrap_or_default()
    }

    /// Find a document in this category by slug.
    #[must_use]
    pub fn item(&self, slug: &str) -> Option<&Document> {
        self.items.iter().find(|doc| doc.slug == slug)
    }
}

/// A document route for static pre-rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocPathEntry {
    /// Category path, slugs joined by `/`.
    pub category: String,
    /// Document slug.
    pub slug: String,
}

impl DocPathEntry {
    /// Route segments: category slugs followed by the document slug.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        self.category
            .split('/')
            .map(str::to_owned)
            .chain(std::iter::once(self.slug.clone()))
            .collect()
    }
}

/// A resolved docs route.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Page {
    /// The route names a category; `document` is its index.
    Category {
        /// Category slugs from the root.
        path: Vec<String>,
        /// Authored or synthesized index document.
        document: Document,
    },
    /// The route names a document.
    Document {
        /// The document.
        document: Document,
    },
}

impl Page {
    /// The document to display for this route.
    #[must_use]
    pub fn document(&self) -> &Document {
        match self {
            Self::Category { document, .. } | Self::Document { document } => document,
        }
    }
}
