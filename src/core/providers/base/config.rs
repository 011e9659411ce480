//! Settings shared by every adapter

use super::pricing::ModelPrice;
use std::collections::HashMap;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default output ceiling for cost estimation
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Resolved settings an adapter is built from
#[derive(Clone)]
pub struct ProviderSettings {
    /// Provider id, also used in logs and errors
    pub id: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    /// Served models, first is the default
    pub models: Vec<String>,
    pub default_max_tokens: u32,
    /// Extra headers sent on every call
    pub headers: HashMap<String, String>,
    /// Pricing entries overriding the built-in table
    pub pricing: HashMap<String, ModelPrice>,
}

impl ProviderSettings {
    pub fn new(id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            api_key: None,
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            models: Vec::new(),
            default_max_tokens: DEFAULT_MAX_TOKENS,
            headers: HashMap::new(),
            pricing: HashMap::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_price(mut self, model: impl Into<String>, price: ModelPrice) -> Self {
        self.pricing.insert(model.into(), price);
        self
    }

    /// `base_url` joined with `path`, tolerant of trailing slashes
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("id", &self.id)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("models", &self.models)
            .field("default_max_tokens", &self.default_max_tokens)
            .finish()
    }
}
