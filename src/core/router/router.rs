//! Router core structure

use super::builder::RouterBuilder;
use crate::config::Config;
use crate::core::budget::{BudgetTracker, UsageStats};
use crate::core::providers::{ProviderKind, ProviderRegistry};
use crate::core::security::PiiRedactor;
use crate::core::validation::SchemaValidator;
use crate::utils::error::{CircuitBreakerRegistry, CircuitSnapshot, CircuitState, Result};
use crate::utils::logging::AuditSink;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Characters of redacted content kept in audit excerpts
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

/// Orchestrates provider calls for concurrent callers
///
/// All shared state is per provider; unrelated requests never contend on a global lock.
#[derive(Debug)]
pub struct Router {
    pub(crate) registry: ProviderRegistry,
    pub(crate) circuit_breaker: CircuitBreakerRegistry,
    pub(crate) budget: BudgetTracker,
    pub(crate) redactor: PiiRedactor,
    pub(crate) validator: SchemaValidator,
    pub(crate) audit: Arc<dyn AuditSink>,
    pub(crate) excerpt_chars: usize,
}

/// Result of probing one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderHealth {
    pub provider: String,
    pub kind: ProviderKind,
    pub healthy: bool,
    pub circuit_state: CircuitState,
    pub latency_ms: u64,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Build adapters, budgets, circuit breaker and redactor from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        RouterBuilder::from_config(config)?.build()
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn circuit_breaker(&self) -> &CircuitBreakerRegistry {
        &self.circuit_breaker
    }

    pub fn budget_tracker(&self) -> &BudgetTracker {
        &self.budget
    }

    pub fn redactor(&self) -> &PiiRedactor {
        &self.redactor
    }

    /// Today's usage for every provider, in priority order
    pub fn usage_stats(&self) -> Vec<UsageStats> {
        self.registry
            .ids()
            .iter()
            .map(|id| self.budget.get_usage_stats(id))
            .collect()
    }

    /// Circuit state of every provider, in priority order
    pub fn circuit_snapshot(&self) -> Vec<CircuitSnapshot> {
        self.registry
            .ids()
            .iter()
            .map(|id| self.circuit_breaker.snapshot(id))
            .collect()
    }

    /// Probe every provider concurrently
    ///
    /// Probes are bounded by each provider's timeout and do not touch circuit state.
    pub async fn health_check(&self) -> Vec<ProviderHealth> {
        let probes = self.registry.iter().map(|adapter| async move {
            let started = Instant::now();
            let healthy = tokio::time::timeout(adapter.timeout(), adapter.is_healthy())
                .await
                .unwrap_or(false);

            ProviderHealth {
                provider: adapter.id().to_string(),
                kind: adapter.kind(),
                healthy,
                circuit_state: self.circuit_breaker.state(adapter.id()),
                latency_ms: started.elapsed().as_millis() as u64,
            }
        });

        futures::future::join_all(probes).await
    }
}
