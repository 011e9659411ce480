//! Router assembly

use super::router::{DEFAULT_EXCERPT_CHARS, Router};
use crate::config::Config;
use crate::core::budget::{BudgetConfig, BudgetTracker};
use crate::core::providers::{ProviderAdapter, ProviderRegistry};
use crate::core::security::{PiiConfig, PiiRedactor};
use crate::core::validation::SchemaValidator;
use crate::utils::error::{CircuitBreakerConfig, CircuitBreakerRegistry, Result};
use crate::utils::logging::{AuditSink, TracingAuditSink};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Builder for [`Router`]
///
/// Adapters are tried in the order they are added.
#[derive(Debug)]
pub struct RouterBuilder {
    registry: ProviderRegistry,
    budgets: HashMap<String, BudgetConfig>,
    circuit_breaker: CircuitBreakerConfig,
    redaction: PiiConfig,
    audit: Arc<dyn AuditSink>,
    excerpt_chars: usize,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            registry: ProviderRegistry::new(),
            budgets: HashMap::new(),
            circuit_breaker: CircuitBreakerConfig::default(),
            redaction: PiiConfig::default(),
            audit: Arc::new(TracingAuditSink),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }

    /// Builder pre-populated from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            registry: ProviderRegistry::from_config(config)?,
            budgets: config.budgets.clone(),
            circuit_breaker: config.circuit_breaker.into(),
            redaction: config.redaction.clone(),
            ..Self::new()
        })
    }

    /// Add an adapter at the lowest priority
    pub fn provider(mut self, adapter: Arc<dyn ProviderAdapter>) -> Result<Self> {
        self.registry.register(adapter)?;
        Ok(self)
    }

    pub fn budget(mut self, provider: impl Into<String>, budget: BudgetConfig) -> Self {
        self.budgets.insert(provider.into(), budget);
        self
    }

    pub fn circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = config;
        self
    }

    pub fn redaction(mut self, config: PiiConfig) -> Self {
        self.redaction = config;
        self
    }

    pub fn audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = sink;
        self
    }

    pub fn excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    pub fn build(self) -> Result<Router> {
        let redactor = PiiRedactor::new(&self.redaction)?;

        for id in self.budgets.keys() {
            if !self.registry.contains(id) {
                warn!(provider = %id, "budget configured for an unregistered provider");
            }
        }

        info!(
            providers = ?self.registry.ids(),
            budgets = self.budgets.len(),
            redaction = redactor.is_enabled(),
            "router initialised"
        );

        Ok(Router {
            registry: self.registry,
            circuit_breaker: CircuitBreakerRegistry::new(self.circuit_breaker),
            budget: BudgetTracker::new(self.budgets),
            redactor,
            validator: SchemaValidator::new(),
            audit: self.audit,
            excerpt_chars: self.excerpt_chars,
        })
    }
}
