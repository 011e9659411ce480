//! LLM backend adapters
//!
//! Every backend implements [`ProviderAdapter`]; the concrete adapter for a configured
//! provider is chosen at runtime from its [`ProviderKind`].

// Base infrastructure
pub mod base;

// Backends
pub mod anthropic;
pub mod local;
pub mod openai;

// Registry
pub mod provider_registry;

pub use crate::core::traits::ProviderAdapter;
pub use anthropic::AnthropicAdapter;
pub use local::LocalAdapter;
pub use openai::OpenAIAdapter;
pub use provider_registry::ProviderRegistry;

use serde::{Deserialize, Serialize};

/// Backend protocol family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(alias = "openai_compatible")]
    OpenAI,
    Anthropic,
    #[serde(alias = "ollama")]
    Local,
}

impl ProviderKind {
    /// Endpoint used when configuration gives none
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::OpenAI => openai::DEFAULT_BASE_URL,
            ProviderKind::Anthropic => anthropic::DEFAULT_BASE_URL,
            ProviderKind::Local => local::DEFAULT_BASE_URL,
        }
    }

    /// Whether calls need an API key
    pub fn requires_api_key(self) -> bool {
        !matches!(self, ProviderKind::Local)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAI => write!(f, "openai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::Local => write!(f, "local"),
        }
    }
}
