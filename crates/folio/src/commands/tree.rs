//! `folio tree` command implementation.

use clap::Args;
use folio_docs::{Category, DocsResolver, filter_categories};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Print the tree as JSON.
    #[arg(long)]
    pub(crate) json: bool,

    /// Keep only documents whose title or description contains QUERY (case-insensitive).
    #[arg(short, long, value_name = "QUERY")]
    pub(crate) filter: Option<String>,
}

impl TreeArgs {
    pub(crate) fn execute(self, resolver: &DocsResolver, output: &Output) -> Result<(), CliError> {
        let mut categories = resolver.all_docs()?;
        if let Some(query) = &self.filter {
            categories = filter_categories(&categories, query);
            tracing::debug!(query, categories = categories.len(), "Filtered tree");
        }

        if self.json {
            output.line(&serde_json::to_string_pretty(&categories)?);
            return Ok(());
        }

        for row in render(&categories) {
            match row {
                Row::Category(text) => output.heading(&text),
                Row::Document(text) => output.line(&text),
            }
        }
        Ok(())
    }
}

/// One printed line of the tree.
#[derive(Debug, PartialEq)]
enum Row {
    Category(String),
    Document(String),
}

/// Indented outline of the tree: each category, then its documents, then its
/// nested categories.
fn render(categories: &[Category]) -> Vec<Row> {
    fn visit(categories: &[Category], depth: usize, rows: &mut Vec<Row>) {
        let indent = "  ".repeat(depth);
        for category in categories {
            rows.push(Row::Category(format!(
                "{indent}{} ({}) [{}]",
                category.name, category.slug, category.order
            )));
            rows.extend(
                category
                    .items
                    .iter()
                    .map(|doc| Row::Document(format!("{indent}  - {} ({})", doc.title, doc.slug))),
            );
            visit(category.subcategories(), depth + 1, rows);
        }
    }

    let mut rows = Vec::new();
    visit(categories, 0, &mut rows);
    rows
}
