//! Anthropic adapter

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::API_VERSION;
use super::models::{MessagesRequest, MessagesResponse, WireMessage};
use crate::core::providers::ProviderKind;
use crate::core::providers::base::{
    CharRatioEstimator, HttpTransport, PricingTable, ProviderSettings, TokenEstimator,
};
use crate::core::traits::{AnthropicErrorMapper, ProviderAdapter};
use crate::core::types::{
    FinishReason, GenerationRequest, GenerationResponse, MessageRole, ProviderError,
    RequestContext, Usage,
};
use crate::utils::error::{Result, RouterError};

/// Anthropic accepts temperatures up to 1.0
const MAX_TEMPERATURE: f32 = 1.0;

/// Adapter for the Anthropic Messages API
#[derive(Debug)]
pub struct AnthropicAdapter {
    settings: ProviderSettings,
    transport: HttpTransport,
    pricing: PricingTable,
    estimator: Arc<dyn TokenEstimator>,
}

impl AnthropicAdapter {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("anthropic-version"),
            HeaderValue::from_static(API_VERSION),
        );
        if let Some(api_key) = settings.api_key.as_deref() {
            let value = HeaderValue::from_str(api_key).map_err(|_| {
                RouterError::config(format!("{}: API key is not a valid header value", settings.id))
            })?;
            headers.insert(HeaderName::from_static("x-api-key"), value);
        }

        let transport = HttpTransport::new(&settings, headers)?;
        let pricing = PricingTable::anthropic().with_overrides(&settings.pricing);

        Ok(Self {
            settings,
            transport,
            pricing,
            estimator: Arc::new(CharRatioEstimator::anthropic()),
        })
    }

    /// Replace the default character-ratio estimator
    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    fn build_request(&self, request: &GenerationRequest, model: &str) -> MessagesRequest {
        let messages = request
            .conversation()
            .into_iter()
            .map(|m| WireMessage {
                role: match m.role {
                    MessageRole::Assistant => "assistant",
                    _ => "user",
                },
                content: m.content,
            })
            .collect();

        MessagesRequest {
            model: model.to_string(),
            max_tokens: request.max_tokens.unwrap_or(self.settings.default_max_tokens),
            system: request.system_instructions(),
            messages,
            temperature: request.temperature.map(|t| t.min(MAX_TEMPERATURE)),
        }
    }

    fn parse_response(
        &self,
        response: MessagesResponse,
        request: &GenerationRequest,
        model: &str,
        context: &RequestContext,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let content = response
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if content.trim().is_empty() {
            return Err(ProviderError::empty_content(self.id()));
        }

        let usage = match response.usage {
            Some(usage) => Usage::new(usage.input_tokens, usage.output_tokens),
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
            FinishReason::from_backend(response.stop_reason.as_deref()),
        ))
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn id(&self) -> &str {
        &self.settings.id
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn is_healthy(&self) -> bool {
        self.transport.probe(&self.settings.endpoint("v1/models")).await
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
            "sending messages request"
        );

        let body = self.build_request(request, model);
        let url = self.settings.endpoint("v1/messages");

        self.transport
            .post_json::<_, MessagesResponse, _>(&AnthropicErrorMapper, &url, &body)
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
