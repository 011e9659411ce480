//! Router tests module
//!
//! Scenario tests run against in-process mock adapters.
