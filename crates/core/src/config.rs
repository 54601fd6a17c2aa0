//! Configuration for the search backend connection
//!
//! Settings are layered with the `config` crate: an optional file first,
//! then `BOOKSEARCH_`-prefixed environment variables on top. For example
//! `BOOKSEARCH_SEARCH_SERVICE_NAME=my-service` sets `search_service_name`.

use crate::{BookSearchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Index queried when none is configured
pub const DEFAULT_INDEX_NAME: &str = "good-books";

/// Azure Search REST API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "2023-11-01";

/// Environment variable prefix for configuration keys
pub const ENV_PREFIX: &str = "BOOKSEARCH";

/// Search backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Azure Search service name, used to derive the endpoint
    pub search_service_name: String,
    /// Admin or query API key
    pub search_api_key: String,
    /// Comma-separated facet fields, `*` marks collection fields
    pub search_facets: String,
    /// Full endpoint URL, overrides the one derived from the service name
    #[serde(default)]
    pub search_endpoint: Option<String>,
    /// Index to query
    #[serde(default = "default_index_name")]
    pub index_name: String,
    /// REST API version
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Comma-separated fields to request highlights for
    #[serde(default)]
    pub highlight_fields: Option<String>,
    /// Timeout for a single backend request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl SearchConfig {
    /// Load configuration from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// Load configuration from an optional file and the given environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(BookSearchError::validation(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let config: SearchConfig = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            "Loaded search configuration for service '{}', index '{}'",
            config.search_service_name,
            config.index_name
        );

        Ok(config)
    }

    /// Base URL of the search service
    pub fn endpoint(&self) -> String {
        match &self.search_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.search.windows.net", self.search_service_name),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.search_service_name.trim().is_empty() && self.search_endpoint.is_none() {
            return Err(BookSearchError::validation(
                "search_service_name cannot be empty",
            ));
        }

        if self.search_api_key.trim().is_empty() {
            return Err(BookSearchError::validation("search_api_key cannot be empty"));
        }

        if self.search_facets.trim().is_empty() {
            return Err(BookSearchError::validation("search_facets cannot be empty"));
        }

        if self.index_name.trim().is_empty() {
            return Err(BookSearchError::validation("index_name cannot be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(BookSearchError::validation(
                "request_timeout_seconds must be greater than 0",
            ));
        }

        Ok(())
    }
}

/// Environment source reading `BOOKSEARCH_*` variables
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .try_parsing(true)
}

fn default_index_name() -> String {
    DEFAULT_INDEX_NAME.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_request_timeout() -> u64 {
    30
}
