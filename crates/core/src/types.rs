//! Request and response types for the search and suggest operations

use crate::document::SearchResult;
use crate::filter::FilterClause;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Default page size for search requests
pub const DEFAULT_SEARCH_TOP: u32 = 8;

/// Default number of suggestions
pub const DEFAULT_SUGGEST_TOP: u32 = 5;

/// Default suggester name
pub const DEFAULT_SUGGESTER: &str = "sg";

/// Whether a raw request body carries a usable query
///
/// A missing `q`, or one that is `null`, `false`, zero or empty, means there
/// is nothing to search for.
pub fn has_query(body: &Value) -> bool {
    match body.get("q") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(q)) => !q.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

/// Search request body as sent by the web client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub top: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub skip: Option<u32>,
    #[serde(default)]
    pub filters: Option<Vec<FilterClause>>,
}

impl SearchBody {
    /// Resolve defaults, or `None` when there is no query
    pub fn into_request(self) -> Option<SearchRequest> {
        let query = self.q.filter(|q| !q.is_empty())?;

        Some(SearchRequest {
            query,
            top: self
                .top
                .filter(|top| *top > 0)
                .unwrap_or(DEFAULT_SEARCH_TOP),
            skip: self.skip.unwrap_or(0),
            filters: self.filters.unwrap_or_default(),
        })
    }
}

/// Suggest request body as sent by the web client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestBody {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub top: Option<u32>,
    #[serde(default)]
    pub suggester: Option<String>,
}

impl SuggestBody {
    /// Resolve defaults, or `None` when there is no query
    pub fn into_request(self) -> Option<SuggestRequest> {
        let query = self.q.filter(|q| !q.is_empty())?;

        Some(SuggestRequest {
            query,
            top: self.top.unwrap_or(DEFAULT_SUGGEST_TOP),
            suggester: self
                .suggester
                .unwrap_or_else(|| DEFAULT_SUGGESTER.to_string()),
        })
    }
}

/// A resolved search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top: u32,
    pub skip: u32,
    pub filters: Vec<FilterClause>,
}

impl SearchRequest {
    pub fn new<S: Into<String>>(query: S) -> Self {
        Self {
            query: query.into(),
            top: DEFAULT_SEARCH_TOP,
            skip: 0,
            filters: Vec::new(),
        }
    }

    pub fn with_top(mut self, top: u32) -> Self {
        self.top = top;
        self
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_filter(mut self, clause: FilterClause) -> Self {
        self.filters.push(clause);
        self
    }
}

/// A resolved suggest request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub query: String,
    pub top: u32,
    pub suggester: String,
}

impl SuggestRequest {
    pub fn new<S: Into<String>>(query: S) -> Self {
        Self {
            query: query.into(),
            top: DEFAULT_SUGGEST_TOP,
            suggester: DEFAULT_SUGGESTER.to_string(),
        }
    }
}

/// Search response in the shape the web client expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: u64,
    pub facets: Map<String, Value>,
    pub results: Vec<SearchResult>,
}

/// Suggest response, suggestions are passed through as returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u32),
    Text(String),
}

/// Accept counts as JSON integers or numeric strings
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid count '{}'", s))),
    }
}
