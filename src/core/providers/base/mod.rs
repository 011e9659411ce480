//! Module
//!
//! Contains base components shared by all provider adapters

pub mod config;
pub mod http;
pub mod pricing;
pub mod tokens;

pub use config::ProviderSettings;
pub use http::HttpTransport;
pub use pricing::{ModelPrice, PricingTable};
pub use tokens::{CharRatioEstimator, TokenEstimator};
