//! Router configuration
//!
//! Loaded once at start from YAML, then environment overrides are applied and the
//! result is validated. There is no hot reload.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::budget::BudgetConfig;
use crate::core::security::PiiConfig;
use crate::utils::error::{Result, RouterError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Complete router configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider ids in routing order; providers left out follow in name order
    #[serde(default)]
    pub priority: Vec<String>,
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
    /// Spend ceilings by provider id; a provider without one is unlimited
    #[serde(default)]
    pub budgets: HashMap<String, BudgetConfig>,
    #[serde(default)]
    pub redaction: PiiConfig,
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load, apply environment overrides and validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            RouterError::config(format!("failed to read config file {:?}: {}", path, e))
        })?;

        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        config.check()?;

        debug!(providers = config.providers.len(), "configuration loaded");
        Ok(config)
    }

    /// Parse and validate YAML without consulting the environment
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config = Self::parse(content)?;
        config.check()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| RouterError::config(format!("failed to parse config: {}", e)))
    }

    /// Validate, wrapping the failure as a configuration error
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| RouterError::config(format!("invalid configuration: {}", e)))
    }

    /// Routing order: the explicit priority list, then every other provider by id
    pub fn effective_priority(&self) -> Vec<String> {
        let mut order: Vec<String> = Vec::with_capacity(self.providers.len());
        for id in &self.priority {
            if !order.contains(id) {
                order.push(id.clone());
            }
        }
        for id in self.providers.keys() {
            if !order.contains(id) {
                order.push(id.clone());
            }
        }
        order
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::providers::ProviderKind;
    use crate::core::security::PiiCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
priority: [anthropic, openai]
providers:
  openai:
    kind: openai
    models: [gpt-4o-mini]
  anthropic:
    kind: anthropic
    models: [claude-3-5-haiku-20241022]
    timeout_secs: 30
  ollama:
    kind: local
    models: [llama3.1]
budgets:
  openai: {daily_limit_cents: 500, per_request_limit_cents: 25}
redaction:
  categories: [email, ssn]
circuit_breaker:
  failure_threshold: 3
logging:
  level: debug
"#;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.providers.len(), 3);
        assert_eq!(config.providers["ollama"].kind, ProviderKind::Local);
        assert_eq!(config.providers["anthropic"].timeout_secs, 30);
        assert_eq!(config.budgets["openai"].per_request_limit_cents, 25);
        assert_eq!(
            config.redaction.categories,
            vec![PiiCategory::Email, PiiCategory::Ssn]
        );
        assert!(config.redaction.enabled);
        assert_eq!(config.circuit_breaker.failure_threshold, 3);
        assert_eq!(config.circuit_breaker.reset_timeout_secs, 60);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_effective_priority_appends_unlisted() {
        let config = Config::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(
            config.effective_priority(),
            vec!["anthropic", "openai", "ollama"]
        );
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = Config::from_yaml_str("providers: [").unwrap_err();
        assert!(matches!(err, RouterError::Config(_)));
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let yaml = "priority: [missing]\nproviders:\n  openai: {kind: openai, models: [gpt-4o]}\n";
        let err = Config::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.priority, vec!["anthropic", "openai"]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = Config::from_file("/nonexistent/router.yaml").await.unwrap_err();
        assert!(matches!(err, RouterError::Config(_)));
    }

    #[test]
    fn test_yaml_round_trip_omits_keys() {
        let mut config = Config::from_yaml_str(SAMPLE).unwrap();
        config
            .providers
            .get_mut("openai")
            .unwrap()
            .api_key = Some("sk-hidden".to_string());
        let yaml = config.to_yaml().unwrap();
        assert!(!yaml.contains("sk-hidden"));
    }
}
