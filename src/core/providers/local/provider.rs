//! Local inference adapter

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::models::{ChatRequest, ChatResponse, Options, WireMessage};
use crate::core::providers::ProviderKind;
use crate::core::providers::base::{
    CharRatioEstimator, HttpTransport, PricingTable, ProviderSettings, TokenEstimator,
};
use crate::core::traits::{LocalErrorMapper, ProviderAdapter};
use crate::core::types::{
    FinishReason, GenerationRequest, GenerationResponse, ProviderError, RequestContext, Usage,
};
use crate::utils::error::{Result, RouterError};

/// Adapter for a local inference server
///
/// Local calls are free unless pricing is configured for the model.
#[derive(Debug)]
pub struct LocalAdapter {
    settings: ProviderSettings,
    transport: HttpTransport,
    pricing: PricingTable,
    estimator: Arc<dyn TokenEstimator>,
}

impl LocalAdapter {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = settings.api_key.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
                RouterError::config(format!("{}: API key is not a valid header value", settings.id))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let transport = HttpTransport::new(&settings, headers)?;
        let pricing = PricingTable::empty().with_overrides(&settings.pricing);

        Ok(Self {
            settings,
            transport,
            pricing,
            estimator: Arc::new(CharRatioEstimator::local()),
        })
    }

    /// Replace the default character-ratio estimator
    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    fn build_request(&self, request: &GenerationRequest, model: &str) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: request
                .effective_messages()
                .into_iter()
                .map(|m| WireMessage {
                    role: m.role.to_string(),
                    content: m.content,
                })
                .collect(),
            stream: false,
            options: Options {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        }
    }

    fn parse_response(
        &self,
        response: ChatResponse,
        request: &GenerationRequest,
        model: &str,
        context: &RequestContext,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let content = response
            .message
            .map(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ProviderError::empty_content(self.id()))?;

        let prompt_tokens = response
            .prompt_eval_count
            .unwrap_or_else(|| self.estimate_tokens(&request.input_text()));
        let completion_tokens = response
            .eval_count
            .unwrap_or_else(|| self.estimate_tokens(&content));

        Ok(GenerationResponse::new(
            content,
            Usage::new(prompt_tokens, completion_tokens),
            response.model.unwrap_or_else(|| model.to_string()),
            self.id(),
            &context.correlation_id,
            FinishReason::from_backend(response.done_reason.as_deref()),
        ))
    }
}

#[async_trait]
impl ProviderAdapter for LocalAdapter {
    fn id(&self) -> &str {
        &self.settings.id
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }

    async fn is_healthy(&self) -> bool {
        self.transport.probe(&self.settings.endpoint("api/tags")).await
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
            "sending local chat request"
        );

        let body = self.build_request(request, model);
        let url = self.settings.endpoint("api/chat");

        self.transport
            .post_json::<_, ChatResponse, _>(&LocalErrorMapper, &url, &body)
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
