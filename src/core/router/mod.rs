//! Request router
//!
//! Picks a provider for each request in priority order, consulting the budget tracker
//! and circuit breaker before every call, and falls back to the next candidate on a
//! retryable failure.
//!
//! ## Module Structure
//!
//! - `router` - Router struct, dashboards and health probes
//! - `builder` - Router assembly from configuration or hand-built adapters
//! - `selection` - Candidate provider and model resolution
//! - `execution` - The per-request attempt loop

pub mod builder;
mod execution;
pub mod router;
mod selection;

#[cfg(test)]
mod tests;

pub use builder::RouterBuilder;
pub use router::{ProviderHealth, Router};
pub use selection::Candidate;
