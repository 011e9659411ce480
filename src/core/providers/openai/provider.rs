//! OpenAI-style adapter

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::models::{ChatCompletionRequest, ChatCompletionResponse, ResponseFormat, WireMessage};
use crate::core::providers::ProviderKind;
use crate::core::providers::base::{
    CharRatioEstimator, HttpTransport, PricingTable, ProviderSettings, TokenEstimator,
};
use crate::core::traits::{OpenAIErrorMapper, ProviderAdapter};
use crate::core::types::{
    FinishReason, GenerationRequest, GenerationResponse, ProviderError, RequestContext, Usage,
};
use crate::utils::error::{Result, RouterError};

/// Adapter for OpenAI-compatible chat completion APIs
#[derive(Debug)]
pub struct OpenAIAdapter {
    settings: ProviderSettings,
    transport: HttpTransport,
    pricing: PricingTable,
    estimator: Arc<dyn TokenEstimator>,
}

impl OpenAIAdapter {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = settings.api_key.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
                RouterError::config(format!("{}: API key is not a valid header value", settings.id))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let transport = HttpTransport::new(&settings, headers)?;
        let pricing = PricingTable::openai().with_overrides(&settings.pricing);

        Ok(Self {
            settings,
            transport,
            pricing,
            estimator: Arc::new(CharRatioEstimator::openai()),
        })
    }

    /// Replace the default character-ratio estimator
    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    fn build_request(&self, request: &GenerationRequest, model: &str) -> ChatCompletionRequest {
        let messages = request
            .effective_messages()
            .into_iter()
            .map(|m| WireMessage {
                role: m.role.to_string(),
                content: Some(m.content),
            })
            .collect();

        ChatCompletionRequest {
            model: model.to_string(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: request.schema.as_ref().map(|_| ResponseFormat {
                format_type: "json_object",
            }),
        }
    }

    fn parse_response(
        &self,
        response: ChatCompletionResponse,
        request: &GenerationRequest,
        model: &str,
        context: &RequestContext,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let choice = response.choices.into_iter().next();
        let finish_reason =
            FinishReason::from_backend(choice.as_ref().and_then(|c| c.finish_reason.as_deref()));
        let content = choice
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ProviderError::empty_content(self.id()))?;

        let usage = match response.usage {
            Some(usage) => Usage::new(usage.prompt_tokens, usage.completion_tokens),
            None => Usage::new(
                self.estimate_tokens(&request.input_text()),
                self.estimate_tokens(&content),
            ),
        };

        Ok(GenerationResponse::new(
            content,
            usage,
            response.model.unwrap_or_else(|| model.to_string()),
            self.id(),
            &context.correlation_id,
            finish_reason,
        ))
    }
}

#[async_trait]
impl ProviderAdapter for OpenAIAdapter {
    fn id(&self) -> &str {
        &self.settings.id
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    async fn is_healthy(&self) -> bool {
        self.transport.probe(&self.settings.endpoint("models")).await
    }

    async fn generate_completion(
        &self,
        request: &GenerationRequest,
        model: &str,
        context: &RequestContext,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        debug!(
            provider = %self.id(),
            model,
            correlation_id = %context.correlation_id,
            "sending chat completion"
        );

        let body = self.build_request(request, model);
        let url = self.settings.endpoint("chat/completions");

        self.transport
            .post_json::<_, ChatCompletionResponse, _>(&OpenAIErrorMapper, &url, &body)
            .await
            .and_then(|response| self.parse_response(response, request, model, context))
            .map_err(|e| {
                e.with_model(model)
                    .with_correlation_id(&context.correlation_id)
            })
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        self.estimator.estimate(text)
    }

    fn calculate_cost(&self, model: &str, prompt_tokens: u32, completion_tokens: u32) -> u64 {
        self.pricing
            .cost_cents(model, prompt_tokens, completion_tokens)
    }

    fn supported_models(&self) -> &[String] {
        &self.settings.models
    }

    fn default_max_tokens(&self) -> u32 {
        self.settings.default_max_tokens
    }

    fn timeout(&self) -> Duration {
        self.settings.timeout
    }
}
