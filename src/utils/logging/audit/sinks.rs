//! Audit sinks

use super::types::{AuditOutcome, AuditRecord};
use parking_lot::Mutex;
use std::fmt::Debug;
use tracing::{info, warn};

/// Destination for audit records
pub trait AuditSink: Send + Sync + Debug {
    fn record(&self, record: &AuditRecord);
}

/// Writes each record as a `tracing` event under the `llm_router::audit` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord) {
        let error_kind = record.error_kind.map(|k| k.as_str()).unwrap_or("");
        let detail = record.detail.as_deref().unwrap_or("");
        let excerpt = record.excerpt.as_deref().unwrap_or("");

        match record.outcome {
            AuditOutcome::Failure => warn!(
                target: "llm_router::audit",
                correlation_id = %record.correlation_id,
                provider = %record.provider,
                model = %record.model,
                outcome = record.outcome.as_str(),
                latency_ms = record.latency_ms,
                error_kind,
                detail,
                "provider attempt failed"
            ),
            _ => info!(
                target: "llm_router::audit",
                correlation_id = %record.correlation_id,
                provider = %record.provider,
                model = %record.model,
                outcome = record.outcome.as_str(),
                latency_ms = record.latency_ms,
                prompt_tokens = record.prompt_tokens,
                completion_tokens = record.completion_tokens,
                cost_cents = record.cost_cents,
                detail,
                excerpt,
                "provider attempt"
            ),
        }
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    pub fn records_for(&self, correlation_id: &str) -> Vec<AuditRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.correlation_id == correlation_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &AuditRecord) {
        self.records.lock().push(record.clone());
    }
}
