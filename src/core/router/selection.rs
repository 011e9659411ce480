//! Candidate selection
//!
//! Produces the ordered providers a request may be sent to, each paired with the
//! model it will be asked for. Budget and circuit checks happen later, per attempt.

use super::router::Router;
use crate::core::providers::ProviderAdapter;
use crate::core::types::{ErrorKind, GenerationRequest, ProviderError};
use std::sync::Arc;
use tracing::debug;

/// One provider the router may call for a request
#[derive(Debug, Clone)]
pub struct Candidate {
    pub adapter: Arc<dyn ProviderAdapter>,
    pub model: String,
}

impl Candidate {
    pub fn provider_id(&self) -> &str {
        self.adapter.id()
    }
}

impl Router {
    /// Ordered candidates for a request
    ///
    /// A pinned provider yields at most that provider. A pinned model keeps only
    /// providers that list it. Without a pinned model each provider uses its default.
    /// Selection failures are non-retryable `ModelNotFound` errors.
    pub fn candidates(
        &self,
        request: &GenerationRequest,
        correlation_id: &str,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let not_found = |provider: &str, message: String| {
            ProviderError::new(ErrorKind::ModelNotFound, provider, message)
                .with_retryable(false)
                .with_correlation_id(correlation_id)
        };

        let pool: Vec<Arc<dyn ProviderAdapter>> = match request.provider.as_deref() {
            Some(pinned) => {
                let adapter = self.registry.get(pinned).ok_or_else(|| {
                    not_found(pinned, format!("provider '{}' is not configured", pinned))
                })?;
                vec![Arc::clone(adapter)]
            }
            None => self.registry.iter().cloned().collect(),
        };

        let candidates: Vec<Candidate> = match request.model.as_deref() {
            Some(model) => pool
                .into_iter()
                .filter(|adapter| adapter.supports_model(model))
                .map(|adapter| Candidate {
                    adapter,
                    model: model.to_string(),
                })
                .collect(),
            None => pool
                .into_iter()
                .filter_map(|adapter| {
                    let model = adapter.default_model()?.to_string();
                    Some(Candidate { adapter, model })
                })
                .collect(),
        };

        if candidates.is_empty() {
            let provider = request.provider.as_deref().unwrap_or("router");
            let message = match (request.provider.as_deref(), request.model.as_deref()) {
                (Some(p), Some(m)) => format!("provider '{}' does not serve model '{}'", p, m),
                (None, Some(m)) => format!("no configured provider serves model '{}'", m),
                (Some(p), None) => format!("provider '{}' has no default model", p),
                (None, None) => "no providers configured".to_string(),
            };
            let mut error = not_found(provider, message);
            error.model = request.model.clone();
            return Err(error);
        }

        debug!(
            correlation_id,
            candidates = ?candidates.iter().map(Candidate::provider_id).collect::<Vec<_>>(),
            "resolved routing candidates"
        );

        Ok(candidates)
    }
}
