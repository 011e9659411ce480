//! Global tracing subscriber setup

use crate::config::LoggingConfig;
use crate::utils::error::{Result, RouterError};
use tracing_subscriber::EnvFilter;

/// Install the process-wide `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a subscriber is
/// already installed or the level does not parse as a filter directive.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config, std::env::var("RUST_LOG").ok().as_deref())?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().flatten_event(true).with_current_span(false).try_init()
    } else {
        builder.with_target(false).try_init()
    };

    installed.map_err(|e| RouterError::config(format!("failed to install tracing subscriber: {}", e)))
}

pub(crate) fn build_filter(config: &LoggingConfig, rust_log: Option<&str>) -> Result<EnvFilter> {
    let directives = match rust_log {
        Some(env) if !env.trim().is_empty() => env,
        _ => config.level.as_str(),
    };

    EnvFilter::try_new(directives)
        .map_err(|e| RouterError::config(format!("invalid log filter '{}': {}", directives, e)))
}
