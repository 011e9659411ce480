//! Core type definition module
//!
//! Request, response, message and error shapes shared by every router component.

pub mod context;
pub mod errors;
pub mod message;
pub mod requests;
pub mod responses;

// Re-export all public types
pub use context::RequestContext;
pub use errors::{ErrorKind, ProviderError};
pub use message::{
    ChatMessage, MessageRole, assistant_message, system_message, user_message,
};
pub use requests::GenerationRequest;
pub use responses::{FinishReason, GenerationResponse, Usage};
