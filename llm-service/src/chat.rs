//! Chat message types shared by all providers.

use serde::Serialize;

/// Message author role in a single-turn chat exchange.
///
/// Every prompt built by the pipeline is sent as one user message, so
/// this is the only role the providers are ever handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End-user input.
    User,
}

/// A single chat message: `{ role, content }`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Convenience constructor for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_serializes_with_lowercase_role() {
        let msg = ChatMessage::user("What was revenue?");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["role"], "user");
        assert_eq!(v["content"], "What was revenue?");
    }
}
