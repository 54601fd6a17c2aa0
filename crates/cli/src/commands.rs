//! CLI commands module

use booksearch_core::{Result, SearchConfig, SearchContext};
use std::path::Path;

pub mod facets;
pub mod search;
pub mod serve;
pub mod suggest;

pub use facets::*;
pub use search::*;
pub use serve::*;
pub use suggest::*;

/// Base trait for CLI commands
#[allow(async_fn_in_trait)]
pub trait CliCommand {
    /// Execute the command
    async fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;

    /// Validate command arguments
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Common command execution wrapper
pub async fn execute_command<T: CliCommand>(command: T) -> Result<()> {
    tracing::debug!("Executing command: {}", command.name());

    command.validate()?;
    command.execute().await?;

    tracing::debug!("Command {} completed successfully", command.name());
    Ok(())
}

/// Load configuration and connect a search context to Azure Search
pub fn load_context(config_path: Option<&Path>) -> Result<SearchContext> {
    let config = SearchConfig::load(config_path)?;
    booksearch_infra::build_search_context(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use booksearch_core::BookSearchError;

    struct TestCommand {
        valid: bool,
    }

    impl CliCommand for TestCommand {
        async fn execute(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "test"
        }

        fn validate(&self) -> Result<()> {
            if self.valid {
                Ok(())
            } else {
                Err(BookSearchError::validation("invalid"))
            }
        }
    }

    #[tokio::test]
    async fn test_execute_command() {
        assert!(execute_command(TestCommand { valid: true }).await.is_ok());
        assert!(execute_command(TestCommand { valid: false }).await.is_err());
    }

    #[test]
    fn test_load_context_missing_file() {
        let err = load_context(Some(Path::new("/nonexistent/booksearch.yaml"))).unwrap_err();
        assert!(matches!(err, BookSearchError::Validation { .. }));
    }
}
