//! BookSearch CLI Library
//!
//! Command-line interface components for the BookSearch adapter.

use booksearch_core::{BookSearchError, Result};

pub mod commands;
pub mod output;

pub use commands::*;
pub use output::*;

/// CLI version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the CLI environment
pub fn init() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("booksearch encountered an error: {}", info);
    }));

    Ok(())
}

/// Get the appropriate exit code for an error
pub fn exit_code_for_error(error: &BookSearchError) -> i32 {
    match error {
        BookSearchError::Validation { .. } | BookSearchError::Config(_) => 2,
        BookSearchError::UnknownFacetField { .. } => 3,
        BookSearchError::Backend { .. } | BookSearchError::BackendStatus { .. } => 5,
        BookSearchError::MissingField { .. } | BookSearchError::InvalidField { .. } => 6,
        _ => 1,
    }
}
