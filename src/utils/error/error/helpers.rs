//! Helper functions for creating and inspecting router errors

use super::types::RouterError;
use crate::core::types::{ErrorKind, ProviderError};

impl RouterError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_request<C: Into<String>, S: Into<String>>(correlation_id: C, message: S) -> Self {
        Self::InvalidRequest {
            correlation_id: correlation_id.into(),
            message: message.into(),
        }
    }

    pub fn exhausted(
        correlation_id: impl Into<String>,
        attempted: Vec<String>,
        skipped: Vec<String>,
        last_error: Option<ProviderError>,
    ) -> Self {
        Self::ProvidersExhausted {
            correlation_id: correlation_id.into(),
            attempted,
            skipped,
            last_error: last_error.map(Box::new),
        }
    }

    /// Correlation id of the request that produced this error, if any
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            Self::Provider(err) if !err.correlation_id.is_empty() => Some(&err.correlation_id),
            Self::ProvidersExhausted { correlation_id, .. }
            | Self::InvalidRequest { correlation_id, .. } => Some(correlation_id),
            _ => None,
        }
    }

    /// Canonical kind for request-level failures
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Provider(err) => Some(err.kind),
            Self::ProvidersExhausted { last_error, .. } => last_error.as_ref().map(|e| e.kind),
            Self::InvalidRequest { .. } => Some(ErrorKind::BadRequest),
            _ => None,
        }
    }

    /// Whether retrying the same request later could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_retryable(),
            Self::ProvidersExhausted { .. } => true,
            _ => false,
        }
    }

    /// The provider error carried by this error, if any
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            Self::ProvidersExhausted { last_error, .. } => last_error.as_deref(),
            _ => None,
        }
    }
}
