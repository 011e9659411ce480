//! Environment overrides
//!
//! Key resolution per provider, later steps winning:
//! 1. `api_key` from the file
//! 2. the variable named by `api_key_env`
//! 3. `LLM_ROUTER_<ID>_API_KEY` (id upper-cased, `-` and `.` become `_`)
//!
//! `OPENAI_API_KEY` / `ANTHROPIC_API_KEY` fill in only when nothing else did.
//! `LLM_ROUTER_LOG_LEVEL` overrides the log level.

use super::Config;
use crate::core::providers::ProviderKind;
use tracing::{debug, warn};

/// Prefix of router-specific environment variables
pub const ENV_PREFIX: &str = "LLM_ROUTER_";

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for (id, provider) in self.providers.iter_mut() {
            if let Some(var) = provider.api_key_env.as_deref() {
                match get(var) {
                    Some(key) => {
                        debug!(provider = %id, var, "API key taken from environment");
                        provider.api_key = Some(key);
                    }
                    None => warn!(provider = %id, var, "api_key_env is set but the variable is empty"),
                }
            }

            if let Some(key) = get(&provider_key_var(id)) {
                debug!(provider = %id, "API key taken from {}", provider_key_var(id));
                provider.api_key = Some(key);
            }

            if provider.api_key.as_deref().is_none_or(str::is_empty) {
                if let Some(var) = conventional_key_var(provider.kind) {
                    if let Some(key) = get(var) {
                        debug!(provider = %id, var, "API key taken from conventional variable");
                        provider.api_key = Some(key);
                    }
                }
            }
        }

        if let Some(level) = get(&format!("{}LOG_LEVEL", ENV_PREFIX)) {
            self.logging.level = level;
        }
    }
}

/// `LLM_ROUTER_<ID>_API_KEY` for a provider id
pub fn provider_key_var(id: &str) -> String {
    let normalized: String = id
        .chars()
        .map(|c| match c {
            '-' | '.' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    format!("{}{}_API_KEY", ENV_PREFIX, normalized)
}

fn conventional_key_var(kind: ProviderKind) -> Option<&'static str> {
    match kind {
        ProviderKind::OpenAI => Some("OPENAI_API_KEY"),
        ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
        ProviderKind::Local => None,
    }
}
