//! Canonical provider error
//!
//! Every backend failure is folded into a single [`ProviderError`] carrying one of a
//! closed set of [`ErrorKind`]s. The router only ever looks at `kind` and `retryable`;
//! backend-specific shapes never leave the adapter that produced them.
//!
//! | Kind | Typical trigger | Retryable |
//! |------|-----------------|-----------|
//! | RateLimited | 429 | Yes |
//! | Unauthorized | 401 / 403 | No |
//! | BadRequest | 400 / 422 | No |
//! | ModelNotFound | 404 | Yes (another backend may serve the request) |
//! | ConnectionRefused | connect failure | Yes |
//! | ServerError | 5xx, timeout, cancellation | Yes |
//! | Unknown | anything else, empty content | Yes |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RateLimited,
    Unauthorized,
    BadRequest,
    ModelNotFound,
    ConnectionRefused,
    ServerError,
    Unknown,
}

impl ErrorKind {
    /// Whether errors of this kind drive fallback unless overridden
    pub fn default_retryable(self) -> bool {
        !matches!(self, ErrorKind::Unauthorized | ErrorKind::BadRequest)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::ModelNotFound => "model_not_found",
            ErrorKind::ConnectionRefused => "connection_refused",
            ErrorKind::ServerError => "server_error",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized error produced by a provider adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind} from {provider}: {message}")]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub provider: String,
    pub model: Option<String>,
    pub correlation_id: String,
    pub message: String,
    /// HTTP status returned by the backend, when there was one
    pub status: Option<u16>,
    pub retryable: bool,
}

impl ProviderError {
    /// Create an error with the kind's default retryability
    pub fn new(kind: ErrorKind, provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            provider: provider.into(),
            model: None,
            correlation_id: String::new(),
            message: message.into(),
            status: None,
            retryable: kind.default_retryable(),
        }
    }

    pub fn rate_limited(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, provider, message)
    }

    pub fn unauthorized(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, provider, message)
    }

    pub fn bad_request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, provider, message)
    }

    pub fn model_not_found(provider: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self::new(
            ErrorKind::ModelNotFound,
            provider,
            format!("model '{}' not found", model),
        )
        .with_model(model)
    }

    pub fn connection_refused(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConnectionRefused, provider, message)
    }

    pub fn server_error(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerError, provider, message)
    }

    pub fn unknown(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, provider, message)
    }

    /// Call exceeded the provider timeout
    pub fn timeout(provider: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::server_error(provider, format!("request timed out after {:?}", timeout))
    }

    /// Caller cancelled the request while the call was in flight
    pub fn cancelled(provider: impl Into<String>) -> Self {
        Self::server_error(provider, "request cancelled by caller")
    }

    /// Backend answered 2xx but without usable content
    pub fn empty_content(provider: impl Into<String>) -> Self {
        Self::unknown(provider, "backend returned no usable content")
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}
