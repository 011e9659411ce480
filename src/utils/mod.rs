//! Utility modules
//!
//! - **error**: crate error type and per-provider circuit breaking
//! - **logging**: tracing setup and the audit trail

pub mod error;
pub mod logging;
