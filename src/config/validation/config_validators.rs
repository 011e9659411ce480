//! Validators for the router configuration

use super::trait_def::Validate;
use crate::config::{CircuitBreakerSettings, Config, LoggingConfig, ProviderConfig};
use crate::core::budget::BudgetConfig;
use crate::core::security::{PiiConfig, PiiRedactor};
use std::collections::HashSet;
use tracing::debug;
use tracing_subscriber::EnvFilter;

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating router configuration");

        if self.providers.is_empty() {
            return Err("At least one provider must be configured".to_string());
        }

        for (id, provider) in &self.providers {
            if id.trim().is_empty() {
                return Err("Provider id cannot be empty".to_string());
            }
            provider
                .validate()
                .map_err(|e| format!("provider '{}': {}", id, e))?;
        }

        let mut seen = HashSet::new();
        for id in &self.priority {
            if !self.providers.contains_key(id) {
                return Err(format!("priority references unknown provider '{}'", id));
            }
            if !seen.insert(id) {
                return Err(format!("provider '{}' listed twice in priority", id));
            }
        }

        for (id, budget) in &self.budgets {
            if !self.providers.contains_key(id) {
                return Err(format!("budget references unknown provider '{}'", id));
            }
            budget
                .validate()
                .map_err(|e| format!("budget '{}': {}", id, e))?;
        }

        self.circuit_breaker.validate()?;
        self.logging.validate()?;
        self.redaction.validate()?;

        debug!("Router configuration validation completed");
        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        let base_url = self.effective_base_url();
        let parsed =
            url::Url::parse(base_url).map_err(|e| format!("invalid base_url '{}': {}", base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                parsed.scheme()
            ));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.models.is_empty() {
            return Err("at least one model must be listed".to_string());
        }
        if self.models.iter().any(|m| m.trim().is_empty()) {
            return Err("model names cannot be empty".to_string());
        }

        if self.default_max_tokens == 0 {
            return Err("default_max_tokens must be greater than 0".to_string());
        }

        if let Some(var) = self.api_key_env.as_deref() {
            if var.trim().is_empty() {
                return Err("api_key_env cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for BudgetConfig {
    fn validate(&self) -> Result<(), String> {
        if self.per_request_limit_cents > self.daily_limit_cents {
            return Err(format!(
                "per_request_limit_cents ({}) exceeds daily_limit_cents ({})",
                self.per_request_limit_cents, self.daily_limit_cents
            ));
        }
        Ok(())
    }
}

impl Validate for CircuitBreakerSettings {
    fn validate(&self) -> Result<(), String> {
        if self.failure_threshold == 0 {
            return Err("circuit_breaker.failure_threshold must be greater than 0".to_string());
        }
        if self.reset_timeout_secs == 0 {
            return Err("circuit_breaker.reset_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("invalid log level '{}': {}", self.level, e))
    }
}

impl Validate for PiiConfig {
    fn validate(&self) -> Result<(), String> {
        PiiRedactor::new(self)
            .map(|_| ())
            .map_err(|e| format!("redaction: {}", e))
    }
}
