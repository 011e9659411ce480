//! Message types for role-tagged conversations

use serde::{Deserialize, Serialize};

/// Message role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single role-tagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Create a system message
pub fn system_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(MessageRole::System, content)
}

/// Create a user message
pub fn user_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(MessageRole::User, content)
}

/// Create an assistant message
pub fn assistant_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(MessageRole::Assistant, content)
}
