//! Structured output validation

mod schema;

pub use schema::{SchemaValidation, SchemaValidator};
