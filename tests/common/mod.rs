//! Common test utilities for llm-router

pub mod fixtures;

pub use fixtures::{anthropic_body, local_body, openai_body, settings};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Ok to be Err, got: {:?}", v),
            Err(e) => e,
        }
    };
}
