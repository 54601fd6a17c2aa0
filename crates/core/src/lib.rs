//! BookSearch Core Library
//!
//! Core functionality for the BookSearch adapter: the facet schema, filter
//! expression building, result shaping and the search context that ties them
//! to a [`SearchBackend`].

pub mod backend;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod facets;
pub mod filter;
pub mod types;

// Re-export commonly used types
pub use backend::{RawSearchResults, SearchBackend, SearchParams, SuggestParams};
pub use config::SearchConfig;
pub use context::SearchContext;
pub use document::{shape_results, BookDocument, Highlights, RawSearchHit, SearchResult};
pub use error::{BookSearchError, ErrorCategory, Result};
pub use facets::{FacetDescriptor, FacetKind};
pub use filter::{build_filter, filter_expression, FilterClause, FilterExpr};
pub use types::{
    SearchBody, SearchRequest, SearchResponse, SuggestBody, SuggestRequest, SuggestResponse,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
