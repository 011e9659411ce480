//! Integration tests for llm-router
//!
//! Every test talks real HTTP to a local `wiremock` server.

pub mod config_tests;
pub mod provider_tests;
pub mod router_tests;
