//! Configuration data models

pub mod logging;
pub mod provider;
pub mod router;

pub use logging::LoggingConfig;
pub use provider::ProviderConfig;
pub use router::CircuitBreakerSettings;

/// Default request timeout in seconds
pub fn default_timeout_secs() -> u64 {
    crate::core::providers::base::config::DEFAULT_TIMEOUT_SECS
}

/// Default output ceiling used for cost estimation
pub fn default_max_tokens() -> u32 {
    crate::core::providers::base::config::DEFAULT_MAX_TOKENS
}

/// Default consecutive failures before a circuit opens
pub fn default_failure_threshold() -> u32 {
    5
}

/// Default open-circuit cool-down in seconds
pub fn default_reset_timeout_secs() -> u64 {
    60
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
