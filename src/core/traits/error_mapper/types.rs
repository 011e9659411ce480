//! Generic error mapping building blocks

use super::trait_def::ErrorMapper;
use crate::core::types::ErrorKind;
use serde_json::Value;

/// Longest body excerpt carried into an error message
const MAX_BODY_EXCERPT: usize = 200;

/// Canonical kind for an HTTP status
pub fn kind_for_status(status: u16) -> ErrorKind {
    match status {
        400 | 413 | 422 => ErrorKind::BadRequest,
        401 | 403 => ErrorKind::Unauthorized,
        404 => ErrorKind::ModelNotFound,
        408 => ErrorKind::ServerError,
        429 => ErrorKind::RateLimited,
        500..=599 => ErrorKind::ServerError,
        _ => ErrorKind::Unknown,
    }
}

/// Best-effort human message from an error body
///
/// Understands `{"error": {"message": ..}}`, `{"error": ".."}`, `{"message": ..}` and
/// `{"detail": ..}`; anything else yields a truncated copy of the raw body.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        let candidates = [
            json.get("error").and_then(|e| e.get("message")),
            json.get("error"),
            json.get("message"),
            json.get("detail"),
        ];
        if let Some(message) = candidates.into_iter().flatten().find_map(Value::as_str) {
            return Some(message.to_string());
        }
    }

    Some(trimmed.chars().take(MAX_BODY_EXCERPT).collect())
}

/// Failure raised by the HTTP client before a status line was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// TCP/TLS connection could not be established
    Connect(String),
    /// The client-side timeout fired
    Timeout(String),
    Other(String),
}

impl TransportFailure {
    /// Classify a reqwest error
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportFailure::Timeout(error.to_string())
        } else if error.is_connect() {
            TransportFailure::Connect(error.to_string())
        } else {
            TransportFailure::Other(error.to_string())
        }
    }
}

/// Status-table mapper with no backend-specific body handling
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericErrorMapper;

impl ErrorMapper for GenericErrorMapper {}
