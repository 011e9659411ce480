//! Router error types

use crate::core::types::ProviderError;
use thiserror::Error;

/// Result type alias for the router
pub type Result<T> = std::result::Result<T, RouterError>;

/// Main error type for the router
///
/// A caller of [`crate::Router::generate`] receives either a normalized response or
/// exactly one of these. Provider-originated failures keep their canonical
/// [`ProviderError`] so the kind and retryability survive to the caller.
#[derive(Error, Debug)]
pub enum RouterError {
    /// A provider call failed with a non-retryable error, or the pinned provider
    /// could not serve the request
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// Every candidate was skipped or failed with a retryable error
    #[error(
        "All providers exhausted [{correlation_id}]: attempted {attempted:?}, skipped {skipped:?}{}",
        last_error_suffix(.last_error)
    )]
    ProvidersExhausted {
        correlation_id: String,
        /// Providers that were actually called, in order
        attempted: Vec<String>,
        /// Providers skipped by budget or circuit checks, with the reason
        skipped: Vec<String>,
        last_error: Option<Box<ProviderError>>,
    },

    /// The request was rejected before any provider was consulted
    #[error("Invalid request [{correlation_id}]: {message}")]
    InvalidRequest {
        correlation_id: String,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

fn last_error_suffix(last_error: &Option<Box<ProviderError>>) -> String {
    last_error
        .as_ref()
        .map(|e| format!(", last error: {}", e))
        .unwrap_or_default()
}
