//! BookSearch - HTTP adapter over Azure Cognitive Search
//!
//! Serves faceted book search and title suggestions against the
//! `good-books` index, and offers the same queries from the command line.

use anyhow::Context;
use booksearch_cli::{
    execute_command, exit_code_for_error, FacetsArgs, SearchArgs, ServeCommand, SuggestArgs,
};
use booksearch_core::BookSearchError;
use booksearch_infra::{init_logger, LoggerConfig};
use clap::{Parser, Subcommand};
use tracing::error;

#[derive(Parser)]
#[command(name = "booksearch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Faceted book search over Azure Cognitive Search")]
#[command(long_about = r#"
BookSearch fronts the "good-books" Azure Cognitive Search index with two
JSON endpoints, /api/search and /api/suggest, for a browser client.

Configuration is read from an optional file (--config) and from BOOKSEARCH_*
environment variables, e.g. BOOKSEARCH_SEARCH_SERVICE_NAME,
BOOKSEARCH_SEARCH_API_KEY and BOOKSEARCH_SEARCH_FACETS.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeCommand),

    /// Run a single search query
    Search(SearchArgs),

    /// Fetch suggestions for a partial query
    Suggest(SuggestArgs),

    /// Show the configured facet schema
    Facets(FacetsArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<BookSearchError>()
            .map(exit_code_for_error)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    booksearch_cli::init()?;

    match cli.command {
        Commands::Serve(mut command) => {
            if cli.verbose {
                command.log_level = "debug".to_string();
            }
            execute_command(command).await.context("server failed")
        }
        Commands::Search(args) => {
            init_command_logging(cli.verbose)?;
            execute_command(args).await.context("search failed")
        }
        Commands::Suggest(args) => {
            init_command_logging(cli.verbose)?;
            execute_command(args).await.context("suggest failed")
        }
        Commands::Facets(args) => {
            init_command_logging(cli.verbose)?;
            execute_command(args).await.context("could not read facets")
        }
        Commands::Version => {
            println!("booksearch v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", booksearch_core::version_info());
            println!("booksearch-serve v{}", booksearch_serve::VERSION);
            Ok(())
        }
    }
}

/// One-shot commands keep stdout for results and log warnings to stderr
fn init_command_logging(verbose: bool) -> booksearch_core::Result<()> {
    let mut config = LoggerConfig::from_env();
    if verbose {
        config.level = "debug".to_string();
    } else if std::env::var("BOOKSEARCH_LOG_LEVEL").is_err() {
        config.level = "warn".to_string();
    }
    init_logger(config)
}
