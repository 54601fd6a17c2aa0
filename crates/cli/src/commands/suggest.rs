//! Suggest command implementation

use crate::commands::{load_context, CliCommand};
use crate::output::{OutputFormat, OutputFormatter};
use booksearch_core::{types::DEFAULT_SUGGESTER, BookSearchError, Result, SuggestRequest};
use clap::Parser;
use std::path::PathBuf;

/// Suggest titles for a partial query
#[derive(Parser, Debug, Clone)]
#[command(name = "suggest")]
pub struct SuggestArgs {
    /// Partial query text
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Number of suggestions to return
    #[arg(short = 'n', long, default_value = "5")]
    pub top: u32,

    /// Suggester configured on the index
    #[arg(long, default_value = DEFAULT_SUGGESTER)]
    pub suggester: String,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (json, yaml, pretty)
    #[arg(short, long, default_value = "pretty")]
    pub output: OutputFormat,
}

impl CliCommand for SuggestArgs {
    async fn execute(&self) -> Result<()> {
        let context = load_context(self.config.as_deref())?;
        let response = context.suggest(&self.request()).await?;

        let mut formatter = OutputFormatter::new(self.output);
        match self.output {
            OutputFormat::Pretty => formatter.pretty_suggestions(&response.suggestions),
            _ => formatter.output(&response),
        }
    }

    fn name(&self) -> &'static str {
        "suggest"
    }

    fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(BookSearchError::validation("Query cannot be empty"));
        }
        if self.suggester.trim().is_empty() {
            return Err(BookSearchError::validation("Suggester name cannot be empty"));
        }
        Ok(())
    }
}

impl SuggestArgs {
    pub fn request(&self) -> SuggestRequest {
        SuggestRequest {
            query: self.query.clone(),
            top: self.top,
            suggester: self.suggester.clone(),
        }
    }
}
