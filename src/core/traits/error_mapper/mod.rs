//! Error mapping traits and implementations
//!
//! Each backend maps its native failures onto the canonical [`ProviderError`]
//! through a pure, synchronous mapper so the router never needs backend knowledge.
//!
//! # Module Structure
//!
//! - `trait_def` - Core ErrorMapper trait definition
//! - `types` - Status-code table, transport failures and the generic mapper
//! - `implementations` - Backend-specific mappers (OpenAI, Anthropic, local inference)
//! - `tests` - Mapping tables
//!
//! [`ProviderError`]: crate::core::types::ProviderError

pub mod implementations;
pub mod trait_def;
pub mod types;

pub use implementations::{AnthropicErrorMapper, LocalErrorMapper, OpenAIErrorMapper};
pub use trait_def::ErrorMapper;
pub use types::{GenericErrorMapper, TransportFailure, extract_error_message, kind_for_status};
