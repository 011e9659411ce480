//! Error recovery utilities
//!
//! Per-provider circuit breaking. Each provider id owns an independent state machine
//! so one failing backend never blocks traffic to the others.

mod circuit_breaker;
mod types;

pub use circuit_breaker::{CircuitBreakerRegistry, CircuitPermit};
pub use types::{CircuitBreakerConfig, CircuitSnapshot, CircuitState};
