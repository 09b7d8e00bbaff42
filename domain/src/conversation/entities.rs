//! Conversation and message entities
//!
//! A conversation is an append-only message log keyed by id. User
//! messages carry plain text; assistant messages carry the full
//! three-stage deliberation payload so past councils can be replayed.

use crate::council::entries::{StageOneEntry, StageThreeResult, StageTwoEntry};
use serde::{Deserialize, Serialize};

/// Placeholder title until the title generator has run
pub const DEFAULT_TITLE: &str = "New Conversation";

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    User {
        content: String,
    },
    Assistant {
        stage1: Vec<StageOneEntry>,
        stage2: Vec<StageTwoEntry>,
        stage3: StageThreeResult,
    },
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    pub fn assistant(
        stage1: Vec<StageOneEntry>,
        stage2: Vec<StageTwoEntry>,
        stage3: StageThreeResult,
    ) -> Self {
        Message::Assistant {
            stage1,
            stage2,
            stage3,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Message::User { .. })
    }
}

/// A conversation with its full message history (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation with the placeholder title
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
        }
    }

    /// Whether the next user message would be the first one
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
