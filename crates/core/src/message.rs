//! Turn and Conversation domain types.
//!
//! A conversation is the append-only log replayed to the completion
//! endpoint on every step: user text, raw model step payloads, and
//! synthesized observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation, used for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a turn.
///
/// Observations are sent back as `User` turns; the completion endpoint
/// only distinguishes the two sides of the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One immutable entry in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub role: Role,
    /// Raw user text, a raw JSON step payload, or a JSON observation.
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// A user-authored turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// A model-authored turn.
    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }
}

/// Ordered, append-only sequence of turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self {
            id: ConversationId::new(),
            turns: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a turn. The only way a conversation changes.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_turn() {
        let turn = Turn::user("What is it like in Tokyo?");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "What is it like in Tokyo?");
    }

    #[test]
    fn conversation_appends_in_order() {
        let mut conv = Conversation::new();
        assert!(conv.is_empty());

        conv.push(Turn::user("first"));
        conv.push(Turn::model(r#"{"step":"START"}"#));

        assert_eq!(conv.len(), 2);
        assert_eq!(conv.turns()[0].content, "first");
        assert_eq!(conv.turns().last().map(|t| t.role), Some(Role::Model));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Model).unwrap();
        assert_eq!(json, r#""model""#);
    }

    #[test]
    fn conversation_ids_are_unique() {
        assert_ne!(Conversation::new().id, Conversation::new().id);
    }
}
