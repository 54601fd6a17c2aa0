//! Azure Cognitive Search client for BookSearch infrastructure
//!
//! Talks to the index over the REST API (`docs/search` and `docs/suggest`)
//! with a single shared `reqwest` client and the configured API key.

use async_trait::async_trait;
use booksearch_core::{
    BookSearchError, RawSearchResults, Result, SearchBackend, SearchConfig, SearchParams,
    SuggestParams,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Header carrying the API key
const API_KEY_HEADER: &str = "api-key";

/// Azure Search client configuration
#[derive(Debug, Clone)]
pub struct AzureSearchConfig {
    pub endpoint: String,
    pub index_name: String,
    pub api_key: String,
    pub api_version: String,
    pub timeout: Duration,
}

impl From<&SearchConfig> for AzureSearchConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            endpoint: config.endpoint(),
            index_name: config.index_name.clone(),
            api_key: config.search_api_key.clone(),
            api_version: config.api_version.clone(),
            timeout: Duration::from_secs(config.request_timeout_seconds),
        }
    }
}

/// Azure Search client for one index
#[derive(Debug, Clone)]
pub struct AzureSearchClient {
    config: AzureSearchConfig,
    client: reqwest::Client,
}

impl AzureSearchClient {
    /// Create a new Azure Search client
    pub fn new(config: AzureSearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BookSearchError::backend(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a client from the loaded search configuration
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::new(AzureSearchConfig::from(config))
    }

    pub fn config(&self) -> &AzureSearchConfig {
        &self.config
    }

    fn docs_url(&self, operation: &str) -> String {
        format!(
            "{}/indexes/{}/docs/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.index_name,
            operation
        )
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<R> {
        let url = self.docs_url(operation);
        debug!("POST {}", url);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.config.api_version.as_str())])
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                BookSearchError::backend(format!("Failed to send {} request: {}", operation, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Search backend {} request failed with HTTP {}: {}",
                operation, status, body
            );
            return Err(BookSearchError::backend_status(status.as_u16(), body));
        }

        let parsed = response.json::<R>().await.map_err(|e| {
            BookSearchError::backend(format!("Failed to parse {} response: {}", operation, e))
        })?;

        debug!(
            "Search backend {} completed in {}ms",
            operation,
            started.elapsed().as_millis()
        );
        Ok(parsed)
    }
}

#[async_trait]
impl SearchBackend for AzureSearchClient {
    async fn search(&self, params: SearchParams) -> Result<RawSearchResults> {
        let body = SearchBody {
            search: &params.search_text,
            top: params.top,
            skip: params.skip,
            facets: &params.facets,
            filter: params.filter.as_deref(),
            count: params.include_total_count,
            highlight: params.highlight_fields.as_deref(),
        };

        self.post("search", &body).await
    }

    async fn suggest(&self, params: SuggestParams) -> Result<Vec<Value>> {
        let body = SuggestBody {
            search: &params.search_text,
            suggester_name: &params.suggester_name,
            top: params.top,
        };

        let response: SuggestEnvelope = self.post("suggest", &body).await?;
        Ok(response.value)
    }

    fn name(&self) -> &str {
        "azure-search"
    }
}

/// Search request payload
#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    search: &'a str,
    top: u32,
    skip: u32,
    facets: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    count: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlight: Option<&'a str>,
}

/// Suggest request payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestBody<'a> {
    search: &'a str,
    suggester_name: &'a str,
    top: u32,
}

/// Suggest response payload
#[derive(Debug, Deserialize)]
struct SuggestEnvelope {
    #[serde(default)]
    value: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn test_config(endpoint: String) -> AzureSearchConfig {
        AzureSearchConfig {
            endpoint,
            index_name: "good-books".to_string(),
            api_key: "test-key".to_string(),
            api_version: "2023-11-01".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn book(id: &str) -> Value {
        json!({
            "@search.score": 2.5,
            "@search.highlights": null,
            "id": id,
            "title": "The Hobbit",
            "authors": ["J.R.R. Tolkien"]
        })
    }

    #[test]
    fn test_config_from_search_config() {
        let search_config = SearchConfig {
            search_service_name: "books-demo".to_string(),
            search_api_key: "secret".to_string(),
            search_facets: "authors*".to_string(),
            search_endpoint: None,
            index_name: "good-books".to_string(),
            api_version: "2023-11-01".to_string(),
            highlight_fields: None,
            request_timeout_seconds: 12,
        };

        let config = AzureSearchConfig::from(&search_config);
        assert_eq!(config.endpoint, "https://books-demo.search.windows.net");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout, Duration::from_secs(12));

        let client = AzureSearchClient::new(config).unwrap();
        assert_eq!(
            client.docs_url("search"),
            "https://books-demo.search.windows.net/indexes/good-books/docs/search"
        );
    }

    #[test]
    fn test_search_body_serialization() {
        let facets = vec!["authors".to_string(), "language_code".to_string()];
        let body = SearchBody {
            search: "hobbit",
            top: 8,
            skip: 0,
            facets: &facets,
            filter: None,
            count: true,
            highlight: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "search": "hobbit",
                "top": 8,
                "skip": 0,
                "facets": ["authors", "language_code"],
                "count": true
            })
        );
    }

    #[tokio::test]
    async fn test_search_request() {
        crate::init_test_logger().unwrap();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/indexes/good-books/docs/search")
            .match_query(Matcher::UrlEncoded(
                "api-version".into(),
                "2023-11-01".into(),
            ))
            .match_header("api-key", "test-key")
            .match_body(Matcher::Json(json!({
                "search": "tolkien",
                "top": 8,
                "skip": 16,
                "facets": ["authors", "language_code"],
                "filter": "language_code eq 'eng'",
                "count": true,
                "highlight": "title"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "@odata.count": 57,
                    "@search.facets": {"language_code": [{"count": 57, "value": "eng"}]},
                    "value": [book("7"), book("18")]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = AzureSearchClient::new(test_config(server.url())).unwrap();
        let raw = client
            .search(SearchParams {
                search_text: "tolkien".to_string(),
                top: 8,
                skip: 16,
                facets: vec!["authors".to_string(), "language_code".to_string()],
                filter: Some("language_code eq 'eng'".to_string()),
                include_total_count: true,
                highlight_fields: Some("title".to_string()),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(raw.count, Some(57));
        assert_eq!(raw.hits.len(), 2);
        assert_eq!(raw.hits[1].fields["id"], "18");
        assert_eq!(raw.facets["language_code"][0]["count"], 57);
    }

    #[tokio::test]
    async fn test_suggest_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/indexes/good-books/docs/suggest")
            .match_query(Matcher::UrlEncoded(
                "api-version".into(),
                "2023-11-01".into(),
            ))
            .match_header("api-key", "test-key")
            .match_body(Matcher::Json(json!({
                "search": "hob",
                "suggesterName": "sg",
                "top": 5
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "value": [
                        {"@search.text": "The Hobbit", "id": "7"},
                        {"@search.text": "The Hobbit: Graphic Novel", "id": "3811"}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = AzureSearchClient::new(test_config(server.url())).unwrap();
        let suggestions = client
            .suggest(SuggestParams {
                search_text: "hob".to_string(),
                suggester_name: "sg".to_string(),
                top: 5,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0]["@search.text"], "The Hobbit");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/indexes/good-books/docs/search")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":{"code":"","message":"Invalid expression"}}"#)
            .create_async()
            .await;

        let client = AzureSearchClient::new(test_config(server.url())).unwrap();
        let err = client
            .search(SearchParams {
                search_text: "x".to_string(),
                top: 8,
                skip: 0,
                facets: vec![],
                filter: Some("bogus".to_string()),
                include_total_count: true,
                highlight_fields: None,
            })
            .await
            .unwrap_err();

        match err {
            BookSearchError::BackendStatus { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid expression"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let client =
            AzureSearchClient::new(test_config("http://127.0.0.1:1".to_string())).unwrap();
        let err = client
            .suggest(SuggestParams {
                search_text: "x".to_string(),
                suggester_name: "sg".to_string(),
                top: 5,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BookSearchError::Backend { .. }));
    }
}
