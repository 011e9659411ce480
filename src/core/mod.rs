//! Core routing functionality
//!
//! Request and response types, provider adapters and the components the router
//! composes: budgets, circuit state, redaction and schema validation.

pub mod budget;
pub mod providers;
pub mod router;
pub mod security;
pub mod traits;
pub mod types;
pub mod validation;
