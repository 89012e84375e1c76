//! `folio show` command implementation.

use clap::Args;
use folio_docs::{DocsResolver, Document, Page};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Route segments: category slugs, optionally followed by a document slug.
    #[arg(required = true)]
    pub(crate) segments: Vec<String>,

    /// Print the page as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

impl ShowArgs {
    pub(crate) fn execute(self, resolver: &DocsResolver, output: &Output) -> Result<(), CliError> {
        let page = resolver
            .resolve_page(&self.segments)?
            .ok_or_else(|| CliError::NotFound(self.segments.join("/")))?;

        if self.json {
            output.line(&serde_json::to_string_pretty(&page)?);
            return Ok(());
        }

        if let Page::Category { path, .. } = &page {
            output.muted(&format!("Category index: {}", path.join("/")));
        }

        let document = page.document();
        output.heading(&document.title);
        if let Some(description) = &document.description {
            output.line(description);
        }
        output.muted(&byline(document));
        output.line("");
        output.line(&document.content);
        Ok(())
    }
}

/// Date and reading time, e.g. `2024-03-01 · 2 min read`.
fn byline(document: &Document) -> String {
    let minutes = format!("{} min read", document.reading_minutes());
    if document.date.is_empty() {
        minutes
    } else {
        format!("{} · {minutes}", document.date)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_docs::ResolverConfig;
    use folio_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve(content: &str) -> Document {
        let storage = MockStorage::new().with_file("api/auth.mdx", content);
        let resolver = DocsResolver::new(Arc::new(storage), ResolverConfig::default());
        resolver.doc_by_path(&["api", "auth"]).unwrap().unwrap()
    }

    #[test]
    fn test_byline_with_date() {
        let document = resolve("---\ndate: 2024-03-01\n---\nShort body");

        assert_eq!(byline(&document), "2024-03-01 · 1 min read");
    }

    #[test]
    fn test_byline_without_date() {
        let body = ["word"; 401].join(" ");
        let document = resolve(&format!("---\ntitle: Long\n---\n{body}"));

        assert_eq!(byline(&document), "3 min read");
    }
}
