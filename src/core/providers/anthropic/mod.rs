//! Anthropic Messages API backend

mod models;
mod provider;

pub use provider::AnthropicAdapter;

/// Public Anthropic endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Value sent in the `anthropic-version` header
pub const API_VERSION: &str = "2023-06-01";
