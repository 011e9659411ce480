//! # llm-router
//!
//! A resilient routing layer between application code and interchangeable LLM
//! backends.
//!
//! ## Features
//!
//! - **Priority fallback**: providers are tried in configured order; retryable failures
//!   move on to the next one, non-retryable failures return immediately
//! - **Circuit breaking**: a failing provider is taken out of rotation and probed with a
//!   single trial call once its cool-down elapses
//! - **Budget governance**: daily and per-request spend ceilings per provider, in cents
//! - **PII redaction**: response content and audit excerpts are scrubbed before they leave
//! - **Structured output**: optional JSON Schema validation of response content
//! - **Backends**: OpenAI-compatible, Anthropic and local (Ollama-style) servers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_router::{Config, GenerationRequest, Router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/router.yaml").await?;
//!     let router = Router::from_config(&config)?;
//!
//!     let response = router
//!         .generate(GenerationRequest::prompt("Summarize the attached appraisal"))
//!         .await?;
//!
//!     println!("{} via {}: {}", response.model, response.provider, response.content);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, RouterError};

pub use core::budget::{BudgetConfig, BudgetTracker, TokenUsageRecord, UsageStats};
pub use core::providers::{
    AnthropicAdapter, LocalAdapter, OpenAIAdapter, ProviderAdapter, ProviderKind,
    ProviderRegistry,
};
pub use core::router::{ProviderHealth, Router, RouterBuilder};
pub use core::security::{CustomRule, PiiCategory, PiiConfig, PiiRedactor};
pub use core::types::{
    ChatMessage, ErrorKind, FinishReason, GenerationRequest, GenerationResponse, MessageRole,
    ProviderError, RequestContext, Usage, assistant_message, system_message, user_message,
};
pub use core::validation::{SchemaValidation, SchemaValidator};
pub use utils::error::{CircuitBreakerConfig, CircuitBreakerRegistry, CircuitPermit, CircuitSnapshot, CircuitState};
pub use utils::logging::{AuditOutcome, AuditRecord, AuditSink, MemoryAuditSink, TracingAuditSink};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information stamped by the build script
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the Unix epoch
    pub build_time: &'static str,
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
