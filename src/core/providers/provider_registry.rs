//! Provider Registry
//!
//! Holds the configured adapters in routing priority order

use super::{AnthropicAdapter, LocalAdapter, OpenAIAdapter, ProviderAdapter, ProviderKind};
use crate::config::Config;
use crate::utils::error::{Result, RouterError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Ordered set of adapters keyed by provider id
#[derive(Default)]
pub struct ProviderRegistry {
    order: Vec<String>,
    providers: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured provider, ordered by the effective priority list
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::new();

        for id in config.effective_priority() {
            let provider_config = config.providers.get(&id).ok_or_else(|| {
                RouterError::config(format!("priority references unknown provider '{}'", id))
            })?;
            let settings = provider_config.to_settings(&id);
            if provider_config.kind.requires_api_key() && settings.api_key.is_none() {
                warn!(provider = %id, "no API key configured; calls will be rejected as unauthorized");
            }

            let adapter: Arc<dyn ProviderAdapter> = match provider_config.kind {
                ProviderKind::OpenAI => Arc::new(OpenAIAdapter::new(settings)?),
                ProviderKind::Anthropic => Arc::new(AnthropicAdapter::new(settings)?),
                ProviderKind::Local => Arc::new(LocalAdapter::new(settings)?),
            };

            info!(provider = %id, kind = %provider_config.kind, "registered provider");
            registry.register(adapter)?;
        }

        Ok(registry)
    }

    /// Register an adapter at the lowest priority
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) -> Result<()> {
        let id = adapter.id().to_string();
        if self.providers.contains_key(&id) {
            return Err(RouterError::config(format!(
                "provider '{}' registered twice",
                id
            )));
        }
        self.order.push(id.clone());
        self.providers.insert(id, adapter);
        Ok(())
    }

    /// Get provider by id
    pub fn get(&self, id: &str) -> Option<&Arc<dyn ProviderAdapter>> {
        self.providers.get(id)
    }

    /// Check if provider is registered
    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    /// Provider ids in priority order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Adapters in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ProviderAdapter>> {
        self.order.iter().filter_map(|id| self.providers.get(id))
    }

    /// Adapters serving `model`, in priority order
    pub fn find_supporting_model(&self, model: &str) -> Vec<Arc<dyn ProviderAdapter>> {
        self.iter()
            .filter(|p| p.supports_model(model))
            .cloned()
            .collect()
    }

    /// Get provider count
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("provider_count", &self.providers.len())
            .field("order", &self.order)
            .finish()
    }
}
