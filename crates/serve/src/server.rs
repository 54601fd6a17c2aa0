//! Server module for the BookSearch serve crate

use crate::api::create_routes;
use crate::handlers::AppState;
use crate::ServerConfig;
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    Router,
};
use booksearch_core::{BookSearchError, Result, SearchContext};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// BookSearch HTTP server
pub struct BookSearchServer {
    config: ServerConfig,
    app: Router,
}

impl BookSearchServer {
    /// Create a new server over a search context
    pub fn new(config: ServerConfig, context: SearchContext) -> Self {
        let app = create_app(&config, AppState::new(context));

        Self { config, app }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr = self.config.bind_address();
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| BookSearchError::validation(format!("Invalid address {}: {}", addr, e)))?;

        tracing::info!("Starting BookSearch server on {}", addr);

        let listener = tokio::net::TcpListener::bind(socket_addr).await?;

        axum::serve(listener, self.app).await?;

        Ok(())
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Create the Axum application with middleware
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let mut app = create_routes().with_state(state);

    app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(config.max_request_size)),
    );

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([ACCEPT, CONTENT_TYPE]);

        app = app.layer(cors);
    }

    app
}

/// Server builder for configuration
pub struct ServerBuilder {
    config: ServerConfig,
    context: Option<SearchContext>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            context: None,
        }
    }

    /// Set the host address
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Set maximum request size
    pub fn max_request_size(mut self, size: usize) -> Self {
        self.config.max_request_size = size;
        self
    }

    /// Set the search context requests are served from
    pub fn context(mut self, context: SearchContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Build the server
    pub fn build(self) -> Result<BookSearchServer> {
        let context = self
            .context
            .ok_or_else(|| BookSearchError::validation("A search context is required"))?;

        Ok(BookSearchServer::new(self.config, context))
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
