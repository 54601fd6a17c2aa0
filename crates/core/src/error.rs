//! Error handling for the BookSearch core library

use std::fmt;
use thiserror::Error;

/// Result type alias for BookSearch operations
pub type Result<T> = std::result::Result<T, BookSearchError>;

/// Main error type for BookSearch operations
#[derive(Error, Debug)]
pub enum BookSearchError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A filter referenced a field that is not a declared facet
    #[error("Unknown facet field: {field}")]
    UnknownFacetField { field: String },

    /// A raw search hit lacked one of the projected document fields
    #[error("Search result is missing field '{field}'")]
    MissingField { field: String },

    /// A raw search hit carried a projected field with an unexpected type
    #[error("Search result field '{field}' is invalid: {message}")]
    InvalidField { field: String, message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The search backend could not be reached or returned garbage
    #[error("Search backend error: {message}")]
    Backend { message: String },

    /// The search backend answered with a non-success status
    #[error("Search backend returned HTTP {status}")]
    BackendStatus { status: u16, body: String },
}

impl BookSearchError {
    /// Create an unknown facet field error
    pub fn unknown_facet<S: Into<String>>(field: S) -> Self {
        Self::UnknownFacetField {
            field: field.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a backend error
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a backend status error
    pub fn backend_status<S: Into<String>>(status: u16, body: S) -> Self {
        Self::BackendStatus {
            status,
            body: body.into(),
        }
    }

    /// Whether the caller sent something we cannot act on
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownFacetField { .. } | Self::Validation { .. }
        )
    }

    /// Get error category for logging and error responses
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Json(_) => ErrorCategory::Serialization,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::UnknownFacetField { .. } => ErrorCategory::Filter,
            Self::MissingField { .. } | Self::InvalidField { .. } => ErrorCategory::Shape,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Backend { .. } | Self::BackendStatus { .. } => ErrorCategory::Backend,
        }
    }
}

/// Error categories for logging and error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    FileSystem,
    Serialization,
    Configuration,
    Filter,
    Shape,
    Validation,
    Backend,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem => write!(f, "filesystem"),
            Self::Serialization => write!(f, "serialization"),
            Self::Configuration => write!(f, "configuration"),
            Self::Filter => write!(f, "filter"),
            Self::Shape => write!(f, "shape"),
            Self::Validation => write!(f, "validation"),
            Self::Backend => write!(f, "backend"),
        }
    }
}
