//! Search context shared by every request handler
//!
//! Built once at startup from configuration and read-only afterwards.

use crate::backend::{SearchBackend, SearchParams, SuggestParams};
use crate::document::shape_results;
use crate::facets::FacetDescriptor;
use crate::filter::filter_expression;
use crate::types::{SearchRequest, SearchResponse, SuggestRequest, SuggestResponse};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Backend handle plus the facet schema used to query it
#[derive(Clone)]
pub struct SearchContext {
    backend: Arc<dyn SearchBackend>,
    facets: FacetDescriptor,
    highlight_fields: Option<String>,
}

impl std::fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("backend", &self.backend.name())
            .field("facets", &self.facets)
            .field("highlight_fields", &self.highlight_fields)
            .finish()
    }
}

impl SearchContext {
    /// Create a context over a backend and facet schema
    pub fn new(backend: Arc<dyn SearchBackend>, facets: FacetDescriptor) -> Self {
        Self {
            backend,
            facets,
            highlight_fields: None,
        }
    }

    /// Request highlights for the given comma-separated fields
    pub fn with_highlight_fields<S: Into<String>>(mut self, fields: Option<S>) -> Self {
        self.highlight_fields = fields.map(Into::into).filter(|f: &String| !f.is_empty());
        self
    }

    pub fn facets(&self) -> &FacetDescriptor {
        &self.facets
    }

    /// Run a search and shape the response
    ///
    /// # Errors
    ///
    /// Fails on an unknown filter field, a backend failure, or a hit that
    /// cannot be projected. No partial response is produced.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let filter = filter_expression(&request.filters, &self.facets)?;

        info!(
            "Search q='{}' top={} skip={} filters={}",
            request.query,
            request.top,
            request.skip,
            request.filters.len()
        );
        if let Some(ref filter) = filter {
            debug!("Search filter: {}", filter);
        }

        let raw = self
            .backend
            .search(SearchParams {
                search_text: request.query.clone(),
                top: request.top,
                skip: request.skip,
                facets: self.facets.field_names(),
                filter,
                include_total_count: true,
                highlight_fields: self.highlight_fields.clone(),
            })
            .await?;

        let results = shape_results(&raw.hits)?;
        debug!("Shaped {} search results", results.len());

        Ok(SearchResponse {
            count: raw.count.unwrap_or_default(),
            facets: raw.facets,
            results,
        })
    }

    /// Fetch suggestions, passed through without reshaping
    pub async fn suggest(&self, request: &SuggestRequest) -> Result<SuggestResponse> {
        info!(
            "Suggest q='{}' top={} suggester={}",
            request.query, request.top, request.suggester
        );

        let suggestions = self
            .backend
            .suggest(SuggestParams {
                search_text: request.query.clone(),
                suggester_name: request.suggester.clone(),
                top: request.top,
            })
            .await?;

        Ok(SuggestResponse { suggestions })
    }
}
