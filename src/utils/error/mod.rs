//! Error handling utilities
//!
//! The crate-level [`RouterError`] plus the per-provider circuit breaker used to
//! keep failing backends out of rotation.

pub mod error;
pub mod recovery;

pub use error::*;
pub use recovery::*;
