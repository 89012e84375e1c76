//! Folio CLI - Documentation content engine.
//!
//! Provides commands for:
//! - `tree`: Print the resolved category tree
//! - `show`: Print the page a docs route resolves to
//! - `paths`: List document routes for static pre-rendering

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use folio_config::{CliSettings, Config};
use folio_docs::DocsResolver;
use folio_storage::FsStorage;
use tracing_subscriber::EnvFilter;

use commands::{PathsArgs, ShowArgs, TreeArgs};
use error::CliError;
use output::Output;

/// Folio - Documentation content engine.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
struct GlobalArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, global = true)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output (show resolution logs).
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl GlobalArgs {
    /// Load configuration and build a resolver over the configured source directory.
    fn resolver(&self) -> Result<DocsResolver, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let storage = Arc::new(FsStorage::new(config.docs_resolved.source_dir.clone()));
        tracing::debug!(
            source_dir = %storage.source_dir().display(),
            config = ?config.config_path,
            "Loaded configuration"
        );

        Ok(DocsResolver::new(storage, config.resolver_config()))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the category tree.
    Tree(TreeArgs),
    /// Print the page a docs route resolves to.
    Show(ShowArgs),
    /// List document routes.
    Paths(PathsArgs),
}

/// `--verbose` enables DEBUG for folio crates, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("folio=debug,folio_docs=debug,folio_storage=debug,folio_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.global.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = cli.global.resolver().and_then(|resolver| match cli.command {
        Commands::Tree(args) => args.execute(&resolver, &output),
        Commands::Show(args) => args.execute(&resolver, &output),
        Commands::Paths(args) => args.execute(&resolver, &output),
    });

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
