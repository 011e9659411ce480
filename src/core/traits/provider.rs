//! Provider adapter trait
//!
//! Defines the uniform interface every backend implements

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::core::providers::ProviderKind;
use crate::core::types::{GenerationRequest, GenerationResponse, ProviderError, RequestContext};

/// Uniform interface over one configured LLM backend
///
/// The router only talks to backends through this trait. Adapters are selected by
/// configuration at runtime, so a new backend is added by implementing the trait and
/// registering it, never by changing the router.
///
/// # Contract
///
/// - `generate_completion` returns either a response with non-empty content or a
///   [`ProviderError`]; backend-native errors never escape.
/// - Adapters hold no per-request mutable state and are shared across concurrent calls.
/// - Cost is computed from the adapter's own pricing table; an unmapped model costs 0.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
    /// Configured provider id, unique within a router
    fn id(&self) -> &str;

    fn kind(&self) -> ProviderKind;

    /// Lightweight liveness probe
    async fn is_healthy(&self) -> bool;

    /// Run one completion against `model`
    async fn generate_completion(
        &self,
        request: &GenerationRequest,
        model: &str,
        context: &RequestContext,
    ) -> Result<GenerationResponse, ProviderError>;

    /// Pre-flight token estimate for `text`
    fn estimate_tokens(&self, text: &str) -> u32;

    /// Cost in cents for the given token counts
    fn calculate_cost(&self, model: &str, prompt_tokens: u32, completion_tokens: u32) -> u64;

    /// Models this adapter serves, in preference order
    fn supported_models(&self) -> &[String];

    /// Model used when the request does not pin one
    fn default_model(&self) -> Option<&str> {
        self.supported_models().first().map(String::as_str)
    }

    /// Output ceiling used for cost estimation when the request sets none
    fn default_max_tokens(&self) -> u32;

    /// Upper bound on a single call
    fn timeout(&self) -> Duration;

    /// Whether this adapter serves `model`
    fn supports_model(&self, model: &str) -> bool {
        self.supported_models().iter().any(|m| m == model)
    }
}
