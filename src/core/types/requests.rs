//! Generation request

use super::message::{ChatMessage, MessageRole, system_message, user_message};
use serde::{Deserialize, Serialize};

/// Normalized generation request accepted by the router
///
/// The effective input is `messages` when non-empty, otherwise `prompt` as a single
/// user turn. A request with neither is rejected before any provider is consulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-form prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Ordered role-tagged conversation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ChatMessage>,
    /// Pin a model; candidates that do not serve it are skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Pin a provider id; only that provider is tried
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// JSON Schema the response content must satisfy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
    /// Most this request may cost on any single provider, in cents
    ///
    /// Candidates whose pre-flight estimate exceeds the cap are skipped as over
    /// budget, on top of each provider's own per-request limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cost_cents: Option<u64>,
}

impl GenerationRequest {
    /// Request built from a single prompt
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    /// Request built from a conversation
    pub fn messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_max_cost_cents(mut self, max_cost_cents: u64) -> Self {
        self.max_cost_cents = Some(max_cost_cents);
        self
    }

    /// Check the request is well-formed
    pub fn validate(&self) -> Result<(), String> {
        let has_prompt = self.prompt.as_deref().is_some_and(|p| !p.trim().is_empty());
        if self.messages.is_empty() && !has_prompt {
            return Err("request must contain a prompt or at least one message".to_string());
        }
        if self.conversation().is_empty() {
            return Err("request must contain at least one non-system message".to_string());
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }

        if self.max_tokens == Some(0) {
            return Err("max_tokens must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Conversation turns excluding any system prompt
    pub fn conversation(&self) -> Vec<ChatMessage> {
        if !self.messages.is_empty() {
            return self
                .messages
                .iter()
                .filter(|m| m.role != MessageRole::System)
                .cloned()
                .collect();
        }

        self.prompt
            .as_ref()
            .map(|p| vec![user_message(p.clone())])
            .unwrap_or_default()
    }

    /// System instructions: the explicit system prompt followed by any system messages
    pub fn system_instructions(&self) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(system) = self.system_prompt.as_deref() {
            parts.push(system);
        }
        if !self.messages.is_empty() {
            parts.extend(
                self.messages
                    .iter()
                    .filter(|m| m.role == MessageRole::System)
                    .map(|m| m.content.as_str()),
            );
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// Full effective input as OpenAI-style messages, system first
    pub fn effective_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::new();
        if let Some(system) = self.system_instructions() {
            messages.push(system_message(system));
        }
        messages.extend(self.conversation());
        messages
    }

    /// All input text, used for pre-flight token estimation
    pub fn input_text(&self) -> String {
        self.effective_messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
