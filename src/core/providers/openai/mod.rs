//! OpenAI-style chat completions backend
//!
//! Works against api.openai.com and any server exposing the same
//! `/chat/completions` contract.

mod models;
mod provider;

pub use provider::OpenAIAdapter;

/// Public OpenAI endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
