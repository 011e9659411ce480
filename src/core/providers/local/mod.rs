//! Local inference backend (Ollama-style `/api/chat`)

mod models;
mod provider;

pub use provider::LocalAdapter;

/// Default local inference endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
