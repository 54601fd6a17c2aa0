//! BookSearch Infrastructure Library
//!
//! Infrastructure components for the BookSearch adapter: the Azure Search
//! REST client and logging setup.

use booksearch_core::{FacetDescriptor, Result, SearchConfig, SearchContext};
use std::sync::Arc;

pub mod azure;
pub mod logger;

pub use azure::*;
pub use logger::*;

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the search context backed by Azure Search
pub fn build_search_context(config: &SearchConfig) -> Result<SearchContext> {
    let client = AzureSearchClient::from_config(config)?;
    let facets = FacetDescriptor::parse(&config.search_facets);

    tracing::info!(
        "Search context ready: endpoint={}, index={}, facets={}",
        client.config().endpoint,
        client.config().index_name,
        facets.len()
    );

    Ok(SearchContext::new(Arc::new(client), facets)
        .with_highlight_fields(config.highlight_fields.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use booksearch_core::FacetKind;

    #[test]
    fn test_build_search_context() {
        let config = SearchConfig {
            search_service_name: "books-demo".to_string(),
            search_api_key: "secret".to_string(),
            search_facets: "authors*,language_code".to_string(),
            search_endpoint: None,
            index_name: "good-books".to_string(),
            api_version: "2023-11-01".to_string(),
            highlight_fields: Some("title".to_string()),
            request_timeout_seconds: 30,
        };

        let context = build_search_context(&config).unwrap();
        assert_eq!(context.facets().kind("authors"), Some(FacetKind::Array));
        assert_eq!(context.facets().kind("language_code"), Some(FacetKind::Scalar));
    }
}
