//! Serve command implementation

use booksearch_core::{BookSearchError, Result};
use booksearch_infra::{init_logger, LogLevel, LoggerConfig};
use booksearch_serve::{ServerBuilder, ServerConfig};
use clap::Args;
use std::path::PathBuf;

use crate::commands::{load_context, CliCommand};

/// Start the BookSearch HTTP server
#[derive(Debug, Clone, Args)]
pub struct ServeCommand {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "7071")]
    pub port: u16,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable CORS (true or false)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub cors: bool,

    /// Maximum request body size in bytes
    #[arg(long, default_value = "1048576")] // 1MB
    pub max_body_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long)]
    pub json_logs: bool,
}

impl CliCommand for ServeCommand {
    async fn execute(&self) -> Result<()> {
        self.init_logging()?;

        tracing::info!("Starting BookSearch server");
        tracing::info!("Host: {}", self.host);
        tracing::info!("Port: {}", self.port);

        let context = load_context(self.config.as_deref())?;

        let server = ServerBuilder::new()
            .host(self.host.clone())
            .port(self.port)
            .cors(self.cors)
            .max_request_size(self.max_body_size)
            .context(context)
            .build()?;

        tracing::info!(
            "BookSearch server listening on http://{}",
            server.config().bind_address()
        );
        server.start().await
    }

    fn name(&self) -> &'static str {
        "serve"
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(BookSearchError::validation("Port cannot be 0"));
        }

        if !LogLevel::is_valid(&self.log_level) {
            return Err(BookSearchError::validation(format!(
                "Invalid log level: {}. Valid levels: {}",
                self.log_level,
                LogLevel::all_levels().join(", ")
            )));
        }

        if self.max_body_size == 0 {
            return Err(BookSearchError::validation("Max body size cannot be 0"));
        }

        Ok(())
    }
}

impl ServeCommand {
    /// Initialize logging based on command arguments
    fn init_logging(&self) -> Result<()> {
        let mut config = LoggerConfig::from_env();
        config.level = self.log_level.to_lowercase();
        config.json_format |= self.json_logs;
        init_logger(config)
    }

    /// Server settings derived from the flags
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_enabled: self.cors,
            max_request_size: self.max_body_size,
        }
    }
}
