//! Audit record types

use crate::core::types::{ErrorKind, GenerationResponse, ProviderError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to one candidate provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Success,
    Failure,
    SkippedBudget,
    SkippedCircuit,
}

impl AuditOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditOutcome::Success => "success",
            AuditOutcome::Failure => "failure",
            AuditOutcome::SkippedBudget => "skipped_budget",
            AuditOutcome::SkippedCircuit => "skipped_circuit",
        }
    }

    pub fn is_skip(self) -> bool {
        matches!(self, AuditOutcome::SkippedBudget | AuditOutcome::SkippedCircuit)
    }
}

impl std::fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attempt, as written to the audit stream
///
/// `excerpt` must already be redacted when it is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub correlation_id: String,
    pub provider: String,
    pub model: String,
    pub outcome: AuditOutcome,
    pub latency_ms: u64,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub cost_cents: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Error message or skip reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    fn base(
        correlation_id: &str,
        provider: &str,
        model: &str,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            correlation_id: correlation_id.to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
            outcome,
            latency_ms: 0,
            prompt_tokens: 0,
            completion_tokens: 0,
            cost_cents: 0,
            error_kind: None,
            detail: None,
            excerpt: None,
            timestamp: Utc::now(),
        }
    }

    pub fn success(response: &GenerationResponse, excerpt: impl Into<String>) -> Self {
        Self {
            latency_ms: response.latency_ms,
            prompt_tokens: response.usage.prompt_tokens,
            completion_tokens: response.usage.completion_tokens,
            cost_cents: response.cost_cents,
            excerpt: Some(excerpt.into()),
            ..Self::base(
                &response.correlation_id,
                &response.provider,
                &response.model,
                AuditOutcome::Success,
            )
        }
    }

    pub fn failure(
        correlation_id: &str,
        model: &str,
        error: &ProviderError,
        latency_ms: u64,
    ) -> Self {
        Self {
            latency_ms,
            error_kind: Some(error.kind),
            detail: Some(error.message.clone()),
            ..Self::base(correlation_id, &error.provider, model, AuditOutcome::Failure)
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn skipped(
        correlation_id: &str,
        provider: &str,
        model: &str,
        outcome: AuditOutcome,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            detail: Some(reason.into()),
            ..Self::base(correlation_id, provider, model, outcome)
        }
    }
}
