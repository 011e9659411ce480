//! Audit trail of routing attempts
//!
//! One [`AuditRecord`] is emitted per candidate considered by the router, whether it
//! was called or skipped. Sinks never influence routing.

mod sinks;
mod types;

pub use sinks::{AuditSink, MemoryAuditSink, TracingAuditSink};
pub use types::{AuditOutcome, AuditRecord};
