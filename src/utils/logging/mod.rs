//! Logging utilities
//!
//! Subscriber initialisation and the per-attempt audit trail.

pub mod audit;
pub mod subscriber;

pub use audit::{AuditOutcome, AuditRecord, AuditSink, MemoryAuditSink, TracingAuditSink};
pub use subscriber::init_tracing;
