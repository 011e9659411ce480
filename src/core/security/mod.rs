//! PII redaction
//!
//! Deterministic, pattern-based scrubbing of personally identifiable information
//! from text before it reaches logs, audit records or callers.

mod patterns;
mod redactor;
mod types;

pub use patterns::{
    CREDIT_CARD_PATTERN, EIN_PATTERN, EMAIL_PATTERN, IP_ADDRESS_PATTERN, PHONE_PATTERN,
    SSN_PATTERN, STREET_ADDRESS_PATTERN,
};
pub use redactor::PiiRedactor;
pub use types::{CustomRule, PiiCategory, PiiConfig, RedactionError};
