//! Error mapper trait definition

use super::types::{TransportFailure, extract_error_message, kind_for_status};
use crate::core::types::{ErrorKind, ProviderError};

/// Maps backend-native failures to [`ProviderError`]
///
/// Implementations must be pure: the same `(status, body)` or transport failure
/// always yields the same error, which keeps the mapping testable without a network.
///
/// # Common Mappings
/// * `400 / 413 / 422` - BadRequest
/// * `401 / 403` - Unauthorized
/// * `404` - ModelNotFound
/// * `408` - ServerError
/// * `429` - RateLimited
/// * `5xx` - ServerError
pub trait ErrorMapper: Send + Sync + 'static {
    /// Map a non-success HTTP status and its raw body
    fn map_http_error(&self, provider: &str, status: u16, body: &str) -> ProviderError {
        let message = extract_error_message(body)
            .unwrap_or_else(|| format!("HTTP {} from backend", status));
        ProviderError::new(kind_for_status(status), provider, message).with_status(status)
    }

    /// Map a failure that happened before any HTTP status was received
    fn map_transport_error(&self, provider: &str, failure: &TransportFailure) -> ProviderError {
        match failure {
            TransportFailure::Connect(message) => ProviderError::connection_refused(
                provider,
                format!("connection failed: {}", message),
            ),
            TransportFailure::Timeout(message) => {
                ProviderError::server_error(provider, format!("request timed out: {}", message))
            }
            TransportFailure::Other(message) => ProviderError::unknown(provider, message.clone()),
        }
    }

    /// Map a 2xx body that could not be decoded
    fn map_parsing_error(&self, provider: &str, error: &serde_json::Error) -> ProviderError {
        ProviderError::new(
            ErrorKind::Unknown,
            provider,
            format!("failed to decode backend response: {}", error),
        )
    }
}
