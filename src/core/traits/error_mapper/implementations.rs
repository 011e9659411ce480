//! Backend-specific error mappers
//!
//! Each mapper refines the status table with hints from the backend's error body.

use super::trait_def::ErrorMapper;
use super::types::{extract_error_message, kind_for_status};
use crate::core::types::{ErrorKind, ProviderError};
use serde_json::Value;

fn error_object(body: &str) -> Option<Value> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("error").cloned())
}

fn field<'a>(error: &'a Value, name: &str) -> &'a str {
    error.get(name).and_then(Value::as_str).unwrap_or("")
}

fn build(provider: &str, kind: ErrorKind, status: u16, body: &str) -> ProviderError {
    let message =
        extract_error_message(body).unwrap_or_else(|| format!("HTTP {} from backend", status));
    ProviderError::new(kind, provider, message).with_status(status)
}

/// OpenAI-style error mapper
///
/// Body shape: `{"error": {"type": .., "code": .., "message": ..}}`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAIErrorMapper;

impl ErrorMapper for OpenAIErrorMapper {
    fn map_http_error(&self, provider: &str, status: u16, body: &str) -> ProviderError {
        let mut kind = kind_for_status(status);

        if let Some(error) = error_object(body) {
            let code = field(&error, "code");
            let error_type = field(&error, "type");

            kind = match (code, error_type) {
                ("model_not_found", _) => ErrorKind::ModelNotFound,
                ("invalid_api_key", _) | (_, "authentication_error") => ErrorKind::Unauthorized,
                ("context_length_exceeded", _) => ErrorKind::BadRequest,
                ("insufficient_quota", _) | ("rate_limit_exceeded", _) => ErrorKind::RateLimited,
                (_, "server_error") if status >= 500 => ErrorKind::ServerError,
                _ => kind,
            };
        }

        build(provider, kind, status, body)
    }
}

/// Anthropic-style error mapper
///
/// Body shape: `{"type": "error", "error": {"type": .., "message": ..}}`; 529 means
/// the service is overloaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicErrorMapper;

impl ErrorMapper for AnthropicErrorMapper {
    fn map_http_error(&self, provider: &str, status: u16, body: &str) -> ProviderError {
        let by_status = kind_for_status(status);

        let kind = match error_object(body).as_ref().map(|e| field(e, "type")) {
            Some("authentication_error") | Some("permission_error") => ErrorKind::Unauthorized,
            Some("invalid_request_error") | Some("request_too_large") => ErrorKind::BadRequest,
            Some("not_found_error") => ErrorKind::ModelNotFound,
            Some("rate_limit_error") => ErrorKind::RateLimited,
            Some("overloaded_error") | Some("api_error") => ErrorKind::ServerError,
            _ => by_status,
        };

        build(provider, kind, status, body)
    }
}

/// Local inference (Ollama-style) error mapper
///
/// Body shape: `{"error": "model 'x' not found, try pulling it first"}`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalErrorMapper;

impl ErrorMapper for LocalErrorMapper {
    fn map_http_error(&self, provider: &str, status: u16, body: &str) -> ProviderError {
        let mentions_missing_model = error_object(body)
            .as_ref()
            .and_then(Value::as_str)
            .is_some_and(|message| {
                let message = message.to_ascii_lowercase();
                message.contains("model") && message.contains("not found")
            });

        let kind = if mentions_missing_model {
            ErrorKind::ModelNotFound
        } else {
            kind_for_status(status)
        };

        build(provider, kind, status, body)
    }
}
