//! Generation response

use serde::{Deserialize, Serialize};

/// Token usage reported for one completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Why the backend stopped generating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    #[default]
    Stop,
    Length,
    ContentFilter,
    Error,
}

impl FinishReason {
    /// Map OpenAI `finish_reason`, Anthropic `stop_reason` and Ollama `done_reason`
    pub fn from_backend(reason: Option<&str>) -> Self {
        match reason {
            None => FinishReason::Stop,
            Some("stop") | Some("end_turn") | Some("stop_sequence") | Some("tool_calls")
            | Some("tool_use") => FinishReason::Stop,
            Some("length") | Some("max_tokens") => FinishReason::Length,
            Some("content_filter") | Some("refusal") => FinishReason::ContentFilter,
            Some(_) => FinishReason::Error,
        }
    }
}

/// Normalized response returned by the router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub content: String,
    pub usage: Usage,
    /// Model that actually served the request
    pub model: String,
    /// Provider id that actually served the request
    pub provider: String,
    pub correlation_id: String,
    pub finish_reason: FinishReason,
    /// Cost of this call in cents
    pub cost_cents: u64,
    pub latency_ms: u64,
    /// A schema was supplied and checked against the content
    pub schema_validated: bool,
    /// The schema check passed; always false when no schema was applied
    pub schema_valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
    /// Redaction ran over `content` before it left the router
    pub redacted: bool,
}

impl GenerationResponse {
    /// Response as produced by an adapter, before router post-processing
    pub fn new(
        content: impl Into<String>,
        usage: Usage,
        model: impl Into<String>,
        provider: impl Into<String>,
        correlation_id: impl Into<String>,
        finish_reason: FinishReason,
    ) -> Self {
        Self {
            content: content.into(),
            usage,
            model: model.into(),
            provider: provider.into(),
            correlation_id: correlation_id.into(),
            finish_reason,
            cost_cents: 0,
            latency_ms: 0,
            schema_validated: false,
            schema_valid: false,
            validation_errors: Vec::new(),
            redacted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_total() {
        let usage = Usage::new(120, 30);
        assert_eq!(usage.total_tokens, 150);

        let usage = Usage::new(u32::MAX, 1);
        assert_eq!(usage.total_tokens, u32::MAX);
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from_backend(Some("stop")), FinishReason::Stop);
        assert_eq!(FinishReason::from_backend(Some("end_turn")), FinishReason::Stop);
        assert_eq!(FinishReason::from_backend(Some("length")), FinishReason::Length);
        assert_eq!(FinishReason::from_backend(Some("max_tokens")), FinishReason::Length);
        assert_eq!(
            FinishReason::from_backend(Some("content_filter")),
            FinishReason::ContentFilter
        );
        assert_eq!(FinishReason::from_backend(Some("weird")), FinishReason::Error);
        assert_eq!(FinishReason::from_backend(None), FinishReason::Stop);
    }

    #[test]
    fn test_new_response_has_clear_flags() {
        let response = GenerationResponse::new(
            "hello",
            Usage::new(1, 1),
            "gpt-4o-mini",
            "openai",
            "cid",
            FinishReason::Stop,
        );
        assert!(!response.schema_validated);
        assert!(!response.schema_valid);
        assert!(!response.redacted);
        assert_eq!(response.cost_cents, 0);
    }
}
