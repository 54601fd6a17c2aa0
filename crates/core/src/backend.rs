//! Search backend abstraction
//!
//! The adapter talks to the managed index through [`SearchBackend`], so the
//! handlers can be exercised against an in-process fake.

use crate::document::RawSearchHit;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters of one search call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub search_text: String,
    pub top: u32,
    pub skip: u32,
    /// Facet fields to aggregate
    pub facets: Vec<String>,
    /// Rendered OData filter, `None` for no filtering
    pub filter: Option<String>,
    pub include_total_count: bool,
    /// Comma-separated fields to highlight
    pub highlight_fields: Option<String>,
}

/// Parameters of one suggest call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestParams {
    pub search_text: String,
    pub suggester_name: String,
    pub top: u32,
}

/// Search response envelope as returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSearchResults {
    #[serde(rename = "@odata.count", default)]
    pub count: Option<u64>,
    #[serde(rename = "@search.facets", default)]
    pub facets: Map<String, Value>,
    #[serde(rename = "value", default)]
    pub hits: Vec<RawSearchHit>,
}

/// A full-text search service
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a query and return the raw envelope
    async fn search(&self, params: SearchParams) -> Result<RawSearchResults>;

    /// Fetch suggestions for a partial query
    async fn suggest(&self, params: SuggestParams) -> Result<Vec<Value>>;

    /// Backend name for logging
    fn name(&self) -> &str {
        "search-backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_results_envelope() {
        let mut book = crate::document::tests::raw_book("7", "The Hobbit");
        book["@search.highlights"] = Value::Null;

        let raw: RawSearchResults = serde_json::from_value(json!({
            "@odata.context": "https://books.search.windows.net/indexes('good-books')/$metadata#docs(*)",
            "@odata.count": 42,
            "@search.facets": {
                "language_code": [{"count": 30, "value": "eng"}]
            },
            "value": [book]
        }))
        .unwrap();

        assert_eq!(raw.count, Some(42));
        assert_eq!(raw.facets["language_code"][0]["value"], "eng");
        assert_eq!(raw.hits.len(), 1);
        assert!(raw.hits[0].highlights.is_none());
        assert_eq!(raw.hits[0].fields["id"], "7");
    }

    #[test]
    fn test_raw_results_tolerates_missing_sections() {
        let raw: RawSearchResults = serde_json::from_value(json!({"value": []})).unwrap();
        assert_eq!(raw.count, None);
        assert!(raw.facets.is_empty());
        assert!(raw.hits.is_empty());
    }
}
