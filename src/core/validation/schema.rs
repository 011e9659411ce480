//! JSON Schema validation of generated content
//!
//! A non-conforming response is still a successful call. The outcome is reported
//! through the response flags and the caller decides whether to re-prompt.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Outcome of checking content against a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaValidation {
    pub valid: bool,
    /// Parsed content, present whenever the content was valid JSON
    pub value: Option<Value>,
    pub errors: Vec<String>,
}

impl SchemaValidation {
    fn failed(value: Option<Value>, errors: Vec<String>) -> Self {
        Self {
            valid: false,
            value,
            errors,
        }
    }
}

/// Stateless JSON Schema checker
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Parse `content` as JSON and validate it against `schema`
    pub fn validate(&self, content: &str, schema: &Value) -> SchemaValidation {
        let body = strip_code_fence(content);

        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "response content is not JSON");
                return SchemaValidation::failed(None, vec![format!("content is not valid JSON: {}", e)]);
            }
        };

        let validator = match jsonschema::validator_for(schema) {
            Ok(validator) => validator,
            Err(e) => {
                return SchemaValidation::failed(Some(value), vec![format!("invalid schema: {}", e)]);
            }
        };

        let errors: Vec<String> = validator
            .iter_errors(&value)
            .map(|error| error.to_string())
            .collect();

        if errors.is_empty() {
            SchemaValidation {
                valid: true,
                value: Some(value),
                errors,
            }
        } else {
            debug!(error_count = errors.len(), "response content failed schema validation");
            SchemaValidation::failed(Some(value), errors)
        }
    }
}

/// Unwrap content a model wrapped in a Markdown code fence
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}
