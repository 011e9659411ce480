//! Error handling for the router
//!
//! This module defines the error type returned from every public router operation.

mod conversions;
mod helpers;
mod types;

pub use types::{Result, RouterError};
