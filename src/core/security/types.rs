//! Redaction type definitions

use super::patterns::{
    CREDIT_CARD_PATTERN, EIN_PATTERN, EMAIL_PATTERN, IP_ADDRESS_PATTERN, PHONE_PATTERN,
    SSN_PATTERN, STREET_ADDRESS_PATTERN,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in PII categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    Ssn,
    Email,
    Phone,
    CreditCard,
    Ein,
    StreetAddress,
    IpAddress,
}

impl PiiCategory {
    /// Default activation order; broader numeric patterns run after the narrower ones
    pub const DEFAULT_ORDER: [PiiCategory; 7] = [
        PiiCategory::Email,
        PiiCategory::CreditCard,
        PiiCategory::IpAddress,
        PiiCategory::Ssn,
        PiiCategory::Ein,
        PiiCategory::Phone,
        PiiCategory::StreetAddress,
    ];

    /// Replacement token written in place of a match
    pub fn token(self) -> &'static str {
        match self {
            PiiCategory::Ssn => "[REDACTED_SSN]",
            PiiCategory::Email => "[REDACTED_EMAIL]",
            PiiCategory::Phone => "[REDACTED_PHONE]",
            PiiCategory::CreditCard => "[REDACTED_CREDIT_CARD]",
            PiiCategory::Ein => "[REDACTED_EIN]",
            PiiCategory::StreetAddress => "[REDACTED_ADDRESS]",
            PiiCategory::IpAddress => "[REDACTED_IP]",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PiiCategory::Ssn => "ssn",
            PiiCategory::Email => "email",
            PiiCategory::Phone => "phone",
            PiiCategory::CreditCard => "credit_card",
            PiiCategory::Ein => "ein",
            PiiCategory::StreetAddress => "street_address",
            PiiCategory::IpAddress => "ip_address",
        }
    }

    pub fn pattern(self) -> &'static Regex {
        match self {
            PiiCategory::Ssn => &SSN_PATTERN,
            PiiCategory::Email => &EMAIL_PATTERN,
            PiiCategory::Phone => &PHONE_PATTERN,
            PiiCategory::CreditCard => &CREDIT_CARD_PATTERN,
            PiiCategory::Ein => &EIN_PATTERN,
            PiiCategory::StreetAddress => &STREET_ADDRESS_PATTERN,
            PiiCategory::IpAddress => &IP_ADDRESS_PATTERN,
        }
    }
}

/// Caller-supplied redaction rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    pub name: String,
    /// Regular expression to match
    pub pattern: String,
    /// Fixed token substituted for each match
    pub replacement: String,
}

impl CustomRule {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Redaction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Active categories, applied in this order
    #[serde(default = "default_categories")]
    pub categories: Vec<PiiCategory>,
    /// Applied after the categories, in this order
    #[serde(default)]
    pub custom_rules: Vec<CustomRule>,
}

fn default_enabled() -> bool {
    true
}

fn default_categories() -> Vec<PiiCategory> {
    PiiCategory::DEFAULT_ORDER.to_vec()
}

impl Default for PiiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            categories: default_categories(),
            custom_rules: Vec::new(),
        }
    }
}

impl PiiConfig {
    /// Configuration that leaves text untouched
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Rejected redaction configuration
#[derive(Debug, Error)]
pub enum RedactionError {
    #[error("redaction rule '{name}' has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("redaction rule '{name}' has an empty pattern")]
    EmptyPattern { name: String },

    /// Re-running redaction would rewrite this replacement, so output would not be stable
    #[error("replacement '{replacement}' of rule '{replaced_by}' is matched by rule '{rule}'")]
    UnstableReplacement {
        rule: String,
        replaced_by: String,
        replacement: String,
    },
}
