//! Generated landing pages for categories without an authored index.

use std::collections::BTreeMap;

use crate::model::{Category, Document};

/// Build the index document for `category`, located at `category_path`.
///
/// The body lists every document of the category as a markdown link under an
/// "Available Documentation" heading, followed by one `###` section per nested
/// category listing that category's documents.
pub(crate) fn synthesize_index<S: AsRef<str>>(
    category: &Category,
    category_path: &[S],
    link_prefix: &str,
    index_slug: &str,
    date: String,
) -> Document {
    let base: Vec<&str> = category_path.iter().map(AsRef::as_ref).collect();
    let title = category.name.clone();
    let description = format!("Documentation for {}", category.name);

    let items = link_list(category, &base, link_prefix);
    let subcategories = category
        .subcategories()
        .iter()
        .map(|child| {
            let mut path = base.clone();
            path.push(&child.slug);
            format!("### {}\n{}", child.name, link_list(child, &path, link_prefix))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let content = format!(
        "# {title}\n\n{description}\n\n## Available Documentation\n\n{items}\n\n{subcategories}"
    );

    Document {
        title,
        description: Some(description),
        date,
        order: 0,
        slug: index_slug.to_owned(),
        content,
        extra: BTreeMap::new(),
    }
}

/// One `- [title](url) - description` line per document, joined by newlines.
fn link_list(category: &Category, path: &[&str], link_prefix: &str) -> String {
    category
        .items
        .iter()
        .map(|doc| {
            format!(
                "- [{}]({link_prefix}/{}/{}) - {}",
                doc.title,
                path.join("/"),
                doc.slug,
                doc.description.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(slug: &str, title: &str, description: Option<&str>) -> Document {
        Document {
            title: title.to_owned(),
            description: description.map(str::to_owned),
            date: String::new(),
            order: 0,
            slug: slug.to_owned(),
            content: String::new(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_index_for_flat_category() {
        let category = Category {
            name: "Api".to_owned(),
            slug: "api".to_owned(),
            order: 0,
            items: vec![
                doc("auth", "Authentication", Some("Tokens and keys")),
                doc("limits", "Rate Limits", None),
            ],
            categories: None,
        };

        let index = synthesize_index(&category, &["api"], "/docs", "_index", "now".to_owned());

        assert_eq!(index.title, "Api");
        assert_eq!(index.description.as_deref(), Some("Documentation for Api"));
        assert_eq!(index.slug, "_index");
        assert_eq!(index.date, "now");
        assert_eq!(index.order, 0);
        assert_eq!(
            index.content,
            "# Api\n\nDocumentation for Api\n\n## Available Documentation\n\n\
             - [Authentication](/docs/api/auth) - Tokens and keys\n\
             - [Rate Limits](/docs/api/limits) - \n\n"
        );
    }

    #[test]
    fn test_index_with_subcategories() {
        let category = Category {
            name: "Guides".to_owned(),
            slug: "guides".to_owned(),
            order: 0,
            items: vec![doc("intro", "Intro", None)],
            categories: Some(vec![
                Category {
                    name: "Advanced".to_owned(),
                    slug: "advanced".to_owned(),
                    order: 0,
                    items: vec![doc("tuning", "Tuning", Some("Go fast"))],
                    categories: None,
                },
                Category {
                    name: "Empty".to_owned(),
                    slug: "empty".to_owned(),
                    order: 0,
                    items: vec![],
                    categories: None,
                },
            ]),
        };

        let index = synthesize_index(
            &category,
            &["docs-root", "guides"],
            "/handbook",
            "_index",
            String::new(),
        );

        assert_eq!(
            index.content,
            "# Guides\n\nDocumentation for Guides\n\n## Available Documentation\n\n\
             - [Intro](/handbook/docs-root/guides/intro) - \n\n\
             ### Advanced\n- [Tuning](/handbook/docs-root/guides/advanced/tuning) - Go fast\n\n\
             ### Empty\n"
        );
    }
}
