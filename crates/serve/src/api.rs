//! API routes for the BookSearch server

use crate::handlers::{handle_search, handle_suggest, AppState};
use axum::{
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

/// Path prefix shared by every endpoint
pub const API_PREFIX: &str = "/api";

/// API routes configuration
pub fn create_routes() -> Router<AppState> {
    Router::new().nest(API_PREFIX, api_routes())
}

/// Search and suggest also answer on `/Search` and `/Suggest`
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(handle_search))
        .route("/Search", post(handle_search))
        .route("/suggest", post(handle_suggest))
        .route("/Suggest", post(handle_suggest))
        .route("/health", get(health_check))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
