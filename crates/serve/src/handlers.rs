//! HTTP handlers for the search and suggest endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use booksearch_core::{
    types::has_query, BookSearchError, ErrorCategory, SearchBody, SearchContext, SuggestBody,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Body returned when a request carries no query
pub const NO_QUERY_MESSAGE: &str = "No query param found.";

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub context: Arc<SearchContext>,
}

impl AppState {
    pub fn new(context: SearchContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error category
    pub code: String,
    /// Optional error details
    pub details: Option<String>,
}

/// Adapter error as seen by HTTP clients
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be read as JSON
    Rejected(JsonRejection),
    /// The search operation failed
    Search(BookSearchError),
}

impl From<BookSearchError> for ApiError {
    fn from(err: BookSearchError) -> Self {
        Self::Search(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::Rejected(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                let body = Json(ErrorResponse {
                    error: format!("Invalid request body: {}", rejection.body_text()),
                    code: ErrorCategory::Validation.to_string(),
                    details: None,
                });
                return (rejection.status(), body).into_response();
            }
            Self::Search(err) => err,
        };
        let code = err.category().to_string();

        let (status, message, details) = match err.category() {
            ErrorCategory::Filter | ErrorCategory::Validation | ErrorCategory::Serialization => {
                warn!("Rejected request: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string(), None)
            }
            ErrorCategory::Backend => {
                error!("Search backend error: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Search backend request failed".to_string(),
                    None,
                )
            }
            ErrorCategory::Shape => {
                error!("Result shaping failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Search results did not match the expected document shape".to_string(),
                    Some(err.to_string()),
                )
            }
            ErrorCategory::Configuration | ErrorCategory::FileSystem => {
                error!("Internal error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code,
            details,
        });

        (status, body).into_response()
    }
}

/// Plain-text reply for requests without a query
fn no_query() -> Response {
    info!("Request without query, nothing to do");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        NO_QUERY_MESSAGE,
    )
        .into_response()
}

/// Handler for `POST /api/search`
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    if !has_query(&body) {
        return Ok(no_query());
    }

    let body: SearchBody = serde_json::from_value(body)
        .map_err(|e| BookSearchError::validation(format!("Invalid search request: {}", e)))?;
    let Some(request) = body.into_request() else {
        return Ok(no_query());
    };

    let response = state.context.search(&request).await?;
    Ok(Json(response).into_response())
}

/// Handler for `POST /api/suggest`
pub async fn handle_suggest(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    if !has_query(&body) {
        return Ok(no_query());
    }

    let body: SuggestBody = serde_json::from_value(body)
        .map_err(|e| BookSearchError::validation(format!("Invalid suggest request: {}", e)))?;
    let Some(request) = body.into_request() else {
        return Ok(no_query());
    };

    let response = state.context.suggest(&request).await?;
    Ok(Json(response).into_response())
}
