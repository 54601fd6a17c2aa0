//! Search command for one-shot queries against the index
//!
//! Runs a single query through the same search context the server uses and
//! prints the shaped response.

use crate::commands::{load_context, CliCommand};
use crate::output::{OutputFormat, OutputFormatter};
use booksearch_core::{BookSearchError, FilterClause, Result, SearchRequest};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Search the book index
///
/// # Examples
///
/// ```bash
/// # Basic search
/// booksearch search "hobbit"
///
/// # Second page of five results
/// booksearch search "tolkien" --top 5 --skip 5
///
/// # Narrow by facet values
/// booksearch search "dragons" --filter authors="Robin Hobb" --filter language_code=eng
///
/// # Output as JSON
/// booksearch search "dune" --json
/// ```
#[derive(Parser, Debug, Clone)]
#[command(name = "search")]
#[command(about = "Search the book index")]
pub struct SearchArgs {
    /// Search query text
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Number of results to return
    #[arg(short = 'n', long, default_value = "8")]
    pub top: u32,

    /// Number of results to skip
    #[arg(long, default_value = "0")]
    pub skip: u32,

    /// Facet filter as field=value, may be repeated
    ///
    /// Array facets match when any element equals the value.
    #[arg(short = 'f', long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<FilterClause>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (json, yaml, pretty)
    #[arg(short, long, default_value = "pretty", conflicts_with = "json")]
    pub output: OutputFormat,
}

impl CliCommand for SearchArgs {
    async fn execute(&self) -> Result<()> {
        info!("Query: '{}'", self.query);

        let context = load_context(self.config.as_deref())?;
        let response = context.search(&self.request()).await?;

        let mut formatter = OutputFormatter::new(self.format());
        match formatter.format() {
            OutputFormat::Pretty => formatter.pretty_search(&self.query, &response)?,
            _ => formatter.output(&response)?,
        }

        info!(
            "Search completed with {} of {} results",
            response.results.len(),
            response.count
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(BookSearchError::validation("Query cannot be empty"));
        }

        if self.top == 0 {
            return Err(BookSearchError::validation("top must be greater than 0"));
        }

        Ok(())
    }
}

impl SearchArgs {
    /// The request sent to the search context
    pub fn request(&self) -> SearchRequest {
        self.filters.iter().cloned().fold(
            SearchRequest::new(self.query.clone())
                .with_top(self.top)
                .with_skip(self.skip),
            SearchRequest::with_filter,
        )
    }

    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}
