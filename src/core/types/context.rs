//! Request context types

use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Per-call context threaded from the router into every adapter call
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id assigned at request entry
    pub correlation_id: String,
    /// When the router accepted the request
    pub started_at: Instant,
    /// Caller-side cancellation
    pub cancellation: CancellationToken,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            started_at: Instant::now(),
            cancellation: CancellationToken::new(),
        }
    }
}

impl RequestContext {
    /// Create a context with a fresh correlation id
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a caller-owned cancellation token
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}
