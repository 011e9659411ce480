//! Provider configuration

use super::{default_max_tokens, default_timeout_secs};
use crate::core::providers::ProviderKind;
use crate::core::providers::base::{ModelPrice, ProviderSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// One configured backend; the provider id is its key in the providers map
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Protocol family (openai, anthropic, local)
    pub kind: ProviderKind,
    /// API key; usually left empty and supplied through the environment
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Base URL, defaults to the kind's public endpoint
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Served models, first is the default
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,
    /// Per-model prices overriding the built-in table
    #[serde(default)]
    pub pricing: HashMap<String, ModelPrice>,
    /// Extra headers sent on every call
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            api_key: None,
            api_key_env: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            models: Vec::new(),
            default_max_tokens: default_max_tokens(),
            pricing: HashMap::new(),
            headers: HashMap::new(),
        }
    }

    /// Base URL after applying the kind's default
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.kind.default_base_url())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve into the settings an adapter is built from
    pub fn to_settings(&self, id: &str) -> ProviderSettings {
        let mut settings = ProviderSettings::new(id, self.effective_base_url())
            .with_models(self.models.iter().cloned())
            .with_timeout(self.timeout())
            .with_default_max_tokens(self.default_max_tokens);

        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            settings = settings.with_api_key(key);
        }
        for (name, value) in &self.headers {
            settings = settings.with_header(name.clone(), value.clone());
        }
        for (model, price) in &self.pricing {
            settings = settings.with_price(model.clone(), *price);
        }

        settings
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_key_env", &self.api_key_env)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("models", &self.models)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("pricing", &self.pricing)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_yaml() {
        let config: ProviderConfig = serde_yaml::from_str("kind: anthropic").unwrap();
        assert_eq!(config.kind, ProviderKind::Anthropic);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.default_max_tokens, 1024);
        assert_eq!(config.effective_base_url(), "https://api.anthropic.com");
    }

    #[test]
    fn test_kind_aliases() {
        let config: ProviderConfig = serde_yaml::from_str("kind: ollama").unwrap();
        assert_eq!(config.kind, ProviderKind::Local);
    }

    #[test]
    fn test_to_settings() {
        let yaml = r#"
kind: openai
api_key: sk-test
base_url: http://127.0.0.1:9000/v1
timeout_secs: 5
models: [gpt-4o-mini, gpt-4o]
default_max_tokens: 256
pricing:
  gpt-4o-mini: {input_cents_per_million: 15, output_cents_per_million: 60}
headers:
  OpenAI-Organization: org-1
"#;
        let config: ProviderConfig = serde_yaml::from_str(yaml).unwrap();
        let settings = config.to_settings("primary");

        assert_eq!(settings.id, "primary");
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.models, vec!["gpt-4o-mini", "gpt-4o"]);
        assert_eq!(settings.default_max_tokens, 256);
        assert_eq!(settings.pricing["gpt-4o-mini"], ModelPrice::new(15, 60));
        assert_eq!(settings.headers["OpenAI-Organization"], "org-1");
    }

    #[test]
    fn test_blank_key_is_ignored() {
        let mut config = ProviderConfig::new(ProviderKind::OpenAI);
        config.api_key = Some(String::new());
        assert!(config.to_settings("openai").api_key.is_none());
    }

    #[test]
    fn test_debug_masks_key() {
        let mut config = ProviderConfig::new(ProviderKind::OpenAI);
        config.api_key = Some("sk-secret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }
}
