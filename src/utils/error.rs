//! Error handling module
//!
//! Defines error types and handling logic used in the adapter

use crate::models::canonical::{ErrorBody, ErrorResponse};
use thiserror::Error;

/// Adapter error types
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed streaming chunk
    #[error("Malformed stream chunk: {0}")]
    StreamChunk(String),

    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// External API error
    #[error("External API error: {0}")]
    ExternalApi(String),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdapterError {
    /// Get canonical error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AdapterError::Validation(_) => "invalid_request_error",
            AdapterError::Timeout => "timeout_error",
            AdapterError::StreamChunk(_) => "stream_error",
            AdapterError::ExternalApi(_) | AdapterError::HttpClient(_) => "api_error",
            AdapterError::Config(_)
            | AdapterError::Serialization(_)
            | AdapterError::Internal(_) => "internal_error",
        }
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, AdapterError::Validation(_))
    }

    /// Convert to the canonical error format
    pub fn to_error_response(&self, provider: &str) -> ErrorResponse {
        ErrorResponse::new(
            ErrorBody {
                message: self.to_string(),
                error_type: Some(self.error_type().to_string()),
                param: None,
                code: None,
            },
            provider,
        )
    }
}

/// Result type alias
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add validation error context
    fn validation_context(self, message: &str) -> AdapterResult<T>;

    /// Add external API error context
    fn external_api_context(self, message: &str) -> AdapterResult<T>;

    /// Add internal error context
    fn internal_context(self, message: &str) -> AdapterResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn validation_context(self, message: &str) -> AdapterResult<T> {
        self.map_err(|e| AdapterError::Validation(format!("{}: {}", message, e)))
    }

    fn external_api_context(self, message: &str) -> AdapterResult<T> {
        self.map_err(|e| AdapterError::ExternalApi(format!("{}: {}", message, e)))
    }

    fn internal_context(self, message: &str) -> AdapterResult<T> {
        self.map_err(|e| AdapterError::Internal(format!("{}: {}", message, e)))
    }
}
