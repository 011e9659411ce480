//! Attempt loop
//!
//! Each candidate is tried at most once per request. Budget and circuit denials skip
//! a candidate without counting as a failure. Non-retryable errors and caller
//! cancellation end the request immediately; any other failure moves on to the next
//! candidate.

use super::router::Router;
use super::selection::Candidate;
use crate::core::budget::{BudgetDecision, TokenUsageRecord};
use crate::core::types::{GenerationRequest, GenerationResponse, ProviderError, RequestContext};
use crate::utils::error::{Result, RouterError};
use crate::utils::logging::{AuditOutcome, AuditRecord};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

impl Router {
    /// Route a request to the first provider able to serve it
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.generate_with_context(request, RequestContext::new())
            .await
    }

    /// Like [`generate`](Self::generate), aborting the in-flight call when `cancellation` fires
    pub async fn generate_with_cancellation(
        &self,
        request: GenerationRequest,
        cancellation: CancellationToken,
    ) -> Result<GenerationResponse> {
        self.generate_with_context(request, RequestContext::new().with_cancellation(cancellation))
            .await
    }

    /// Route a request under a caller-built context
    pub async fn generate_with_context(
        &self,
        request: GenerationRequest,
        context: RequestContext,
    ) -> Result<GenerationResponse> {
        let correlation_id = context.correlation_id.clone();

        request
            .validate()
            .map_err(|message| RouterError::invalid_request(&correlation_id, message))?;

        let candidates = self.candidates(&request, &correlation_id)?;

        let mut attempted = Vec::new();
        let mut skipped = Vec::new();
        let mut last_error: Option<ProviderError> = None;

        for candidate in &candidates {
            if context.cancellation.is_cancelled() {
                return Err(ProviderError::cancelled("router")
                    .with_correlation_id(&correlation_id)
                    .into());
            }

            let provider = candidate.provider_id();

            let estimated_cents = self.estimate_cost(candidate, &request);
            let decision = match request.max_cost_cents {
                Some(cap_cents) if estimated_cents > cap_cents => {
                    BudgetDecision::RequestCapExceeded {
                        estimated_cents,
                        cap_cents,
                    }
                }
                _ => self.budget.evaluate(provider, estimated_cents),
            };
            if !decision.is_allowed() {
                info!(correlation_id = %correlation_id, provider, %decision, "skipping provider over budget");
                skipped.push(format!("{}: {}", provider, decision));
                self.audit.record(&AuditRecord::skipped(
                    &correlation_id,
                    provider,
                    &candidate.model,
                    AuditOutcome::SkippedBudget,
                    decision.to_string(),
                ));
                continue;
            }

            // Checked after the budget so a half-open trial is only claimed when a call follows
            let Some(permit) = self.circuit_breaker.try_acquire(provider) else {
                info!(correlation_id = %correlation_id, provider, "skipping provider with open circuit");
                skipped.push(format!("{}: circuit open", provider));
                self.audit.record(&AuditRecord::skipped(
                    &correlation_id,
                    provider,
                    &candidate.model,
                    AuditOutcome::SkippedCircuit,
                    "circuit open",
                ));
                continue;
            };

            attempted.push(provider.to_string());
            let started = Instant::now();

            match self.call_provider(candidate, &request, &context).await {
                Ok(response) => {
                    permit.record_success();
                    let response =
                        self.finish_response(candidate, &request, response, &correlation_id, started);
                    info!(
                        correlation_id = %correlation_id,
                        provider,
                        model = %response.model,
                        latency_ms = response.latency_ms,
                        cost_cents = response.cost_cents,
                        "request served"
                    );
                    return Ok(response);
                }
                Err(error) => {
                    permit.record_failure();
                    let latency_ms = started.elapsed().as_millis() as u64;
                    // Backends echo request content in error bodies
                    let detail = self.redactor.redact(&error.message);
                    self.audit.record(
                        &AuditRecord::failure(&correlation_id, &candidate.model, &error, latency_ms)
                            .with_detail(detail),
                    );

                    if !error.is_retryable() {
                        warn!(correlation_id = %correlation_id, provider, kind = %error.kind, "non-retryable provider error");
                        return Err(error.into());
                    }
                    if context.cancellation.is_cancelled() {
                        debug!(correlation_id = %correlation_id, provider, "request cancelled by caller");
                        return Err(error.into());
                    }

                    debug!(correlation_id = %correlation_id, provider, kind = %error.kind, "falling back after retryable error");
                    last_error = Some(error);
                }
            }
        }

        warn!(
            correlation_id = %correlation_id,
            attempted = ?attempted,
            skipped = ?skipped,
            "all providers exhausted"
        );
        Err(RouterError::exhausted(correlation_id, attempted, skipped, last_error))
    }

    /// Pre-flight cost: estimated prompt tokens plus the full output allowance
    pub(crate) fn estimate_cost(&self, candidate: &Candidate, request: &GenerationRequest) -> u64 {
        let adapter = &candidate.adapter;
        let prompt_tokens = adapter.estimate_tokens(&request.input_text());
        let completion_tokens = request
            .max_tokens
            .unwrap_or_else(|| adapter.default_max_tokens());
        adapter.calculate_cost(&candidate.model, prompt_tokens, completion_tokens)
    }

    /// One bounded adapter call
    async fn call_provider(
        &self,
        candidate: &Candidate,
        request: &GenerationRequest,
        context: &RequestContext,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let adapter = &candidate.adapter;
        let timeout = adapter.timeout();

        let result = tokio::select! {
            biased;
            _ = context.cancellation.cancelled() => Err(ProviderError::cancelled(adapter.id())),
            outcome = tokio::time::timeout(
                timeout,
                adapter.generate_completion(request, &candidate.model, context),
            ) => match outcome {
                Ok(result) => result,
                Err(_) => Err(ProviderError::timeout(adapter.id(), timeout)),
            },
        };

        result.map_err(|mut error| {
            if error.model.is_none() {
                error.model = Some(candidate.model.clone());
            }
            error.with_correlation_id(&context.correlation_id)
        })
    }

    /// Account, validate, redact and audit a successful call
    fn finish_response(
        &self,
        candidate: &Candidate,
        request: &GenerationRequest,
        mut response: GenerationResponse,
        correlation_id: &str,
        started: Instant,
    ) -> GenerationResponse {
        let adapter = &candidate.adapter;
        let usage = response.usage;

        let cost_cents = match adapter.calculate_cost(
            &response.model,
            usage.prompt_tokens,
            usage.completion_tokens,
        ) {
            0 => adapter.calculate_cost(&candidate.model, usage.prompt_tokens, usage.completion_tokens),
            cost => cost,
        };

        self.budget.record_usage(TokenUsageRecord::new(
            adapter.id(),
            response.model.clone(),
            usage,
            cost_cents,
        ));

        response.provider = adapter.id().to_string();
        response.correlation_id = correlation_id.to_string();
        response.cost_cents = cost_cents;
        response.latency_ms = started.elapsed().as_millis() as u64;

        // Validation sees the raw content; redaction could break the JSON
        if let Some(schema) = request.schema.as_ref() {
            let validation = self.validator.validate(&response.content, schema);
            response.schema_validated = true;
            response.schema_valid = validation.valid;
            response.validation_errors = validation.errors;
        }

        if self.redactor.is_enabled() {
            response.content = self.redactor.redact(&response.content);
            response.redacted = true;
        }

        let excerpt = self.redactor.redact_excerpt(&response.content, self.excerpt_chars);
        self.audit.record(&AuditRecord::success(&response, excerpt));

        response
    }
}
