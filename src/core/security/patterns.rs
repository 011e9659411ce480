//! PII detection patterns
//!
//! Pre-compiled regex patterns for detecting personally identifiable information.
//! Matching is deliberately broad: a 9-digit number that is not an SSN is still
//! redacted.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(name: &str, pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        tracing::error!("Failed to compile {} regex: {}", name, e);
        // [^\s\S] matches nothing
        Regex::new(r"[^\s\S]").unwrap()
    })
}

/// SSN: XXX-XX-XXXX, dashes optional
pub static SSN_PATTERN: Lazy<Regex> = Lazy::new(|| compile("SSN", r"\b\d{3}-?\d{2}-?\d{4}\b"));

/// Email: local@domain.tld
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile(
        "email",
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    )
});

/// North American phone numbers: 555-123-4567, (555) 123-4567, +1 555.123.4567
pub static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile(
        "phone",
        r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b",
    )
});

/// Card numbers: 13 to 19 digits, optionally grouped by spaces or dashes
pub static CREDIT_CARD_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile("credit card", r"\b(?:\d[ -]?){12,18}\d\b"));

/// Employer identification number: XX-XXXXXXX
pub static EIN_PATTERN: Lazy<Regex> = Lazy::new(|| compile("EIN", r"\b\d{2}-\d{7}\b"));

/// IPv4 address
pub static IP_ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile(
        "IP address",
        r"\b(?:(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)\b",
    )
});

/// Street address: house number, up to four words, street suffix
pub static STREET_ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile(
        "street address",
        r"(?i)\b\d{1,6}\s+(?:[A-Za-z0-9.]+\s+){1,4}(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Way|Place|Pl|Parkway|Pkwy)\b\.?",
    )
});
