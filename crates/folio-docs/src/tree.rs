//! Traversals over a resolved category tree.
//!
//! These work on any tree returned by [`DocsResolver::all_docs`](crate::DocsResolver::all_docs)
//! and never touch storage.

use crate::model::{Category, DocPathEntry, Document};

/// Flatten a category tree in pre-order.
///
/// Each category comes before its nested categories; a tree with N nodes
/// yields exactly N entries.
#[must_use]
pub fn flatten_categories(categories: &[Category]) -> Vec<&Category> {
    fn visit<'a>(categories: &'a [Category], out: &mut Vec<&'a Category>) {
        for category in categories {
            out.push(category);
            visit(category.subcategories(), out);
        }
    }

    let mut flattened = Vec::new();
    visit(categories, &mut flattened);
    flattened
}

/// Find a category by its slug path.
///
/// Descends one segment at a time, starting at `categories`. Returns `None`
/// for an empty path or if any segment does not match.
#[must_use]
pub fn find_category<'a, S: AsRef<str>>(
    categories: &'a [Category],
    path: &[S],
) -> Option<&'a Category> {
    let (first, rest) = path.split_first()?;
    let category = categories.iter().find(|c| c.slug == first.as_ref())?;
    if rest.is_empty() {
        Some(category)
    } else {
        find_category(category.subcategories(), rest)
    }
}

/// Slug paths of every category, in pre-order.
#[must_use]
pub fn category_paths(categories: &[Category]) -> Vec<Vec<String>> {
    fn visit(categories: &[Category], parent: &[String], out: &mut Vec<Vec<String>>) {
        for category in categories {
            let mut path = parent.to_vec();
            path.push(category.slug.clone());
            out.push(path.clone());
            visit(category.subcategories(), &path, out);
        }
    }

    let mut paths = Vec::new();
    visit(categories, &[], &mut paths);
    paths
}

/// Every document in the tree paired with its category path.
///
/// For each category its own items come first, then its nested categories
/// are visited, then the next sibling.
#[must_use]
pub fn collect_doc_paths(categories: &[Category]) -> Vec<DocPathEntry> {
    fn visit(categories: &[Category], parent: &str, out: &mut Vec<DocPathEntry>) {
        for category in categories {
            let path = if parent.is_empty() {
                category.slug.clone()
            } else {
                format!("{parent}/{}", category.slug)
            };
            out.extend(category.items.iter().map(|doc| DocPathEntry {
                category: path.clone(),
                slug: doc.slug.clone(),
            }));
            visit(category.subcategories(), &path, out);
        }
    }

    let mut paths = Vec::new();
    visit(categories, "", &mut paths);
    paths
}

/// Prune a tree to the documents matching a search query.
///
/// A document matches when its title or description contains `query`,
/// ignoring case. Each category keeps only its matching documents and is
/// dropped when it has none left and no nested category survives. A nested
/// category survives its parent's check if it has matching documents or any
/// nested categories of its own; it is then filtered by the same rules. An
/// empty query matches every document, so only empty leaf categories go.
#[must_use]
pub fn filter_categories(categories: &[Category], query: &str) -> Vec<Category> {
    let query = query.to_lowercase();
    categories
        .iter()
        .filter_map(|category| filter_category(category, &query))
        .collect()
}

fn filter_category(category: &Category, query: &str) -> Option<Category> {
    let items: Vec<Document> = category
        .items
        .iter()
        .filter(|doc| matches_query(doc, query))
        .cloned()
        .collect();

    let candidates: Vec<&Category> = category
        .subcategories()
        .iter()
        .filter(|child| {
            child.categories.is_some() || child.items.iter().any(|doc| matches_query(doc, query))
        })
        .collect();

    if items.is_empty() && candidates.is_empty() {
        return None;
    }

    let nested: Vec<Category> = candidates
        .into_iter()
        .filter_map(|child| filter_category(child, query))
        .collect();

    Some(Category {
        name: category.name.clone(),
        slug: category.slug.clone(),
        order: category.order,
        items,
        categories: (!nested.is_empty()).then_some(nested),
    })
}

/// `query` must already be lowercase.
fn matches_query(doc: &Document, query: &str) -> bool {
    doc.title.to_lowercase().contains(query)
        || doc
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query))
}
