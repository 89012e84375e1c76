//! `folio paths` command implementation.

use clap::Args;
use folio_docs::DocsResolver;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the paths command.
#[derive(Args)]
pub(crate) struct PathsArgs {
    /// List every static route (documents, then categories) instead of document paths.
    #[arg(long)]
    pub(crate) routes: bool,

    /// Print the list as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

impl PathsArgs {
    pub(crate) fn execute(self, resolver: &DocsResolver, output: &Output) -> Result<(), CliError> {
        if self.routes {
            let routes = resolver.static_routes()?;
            if self.json {
                output.line(&serde_json::to_string_pretty(&routes)?);
            } else {
                for route in &routes {
                    output.line(&route.join("/"));
                }
            }
        } else {
            let paths = resolver.all_doc_paths()?;
            if self.json {
                output.line(&serde_json::to_string_pretty(&paths)?);
            } else {
                for entry in &paths {
                    output.line(&format!("{}/{}", entry.category, entry.slug));
                }
            }
        }

        tracing::debug!(routes = self.routes, "Listed paths");
        Ok(())
    }
}
