//! Conversation store port
//!
//! The persistence collaborator: a key-value store of conversations
//! keyed by id, with at-least atomic append semantics per conversation.

use async_trait::async_trait;
use council_domain::{Conversation, StageOneEntry, StageThreeResult, StageTwoEntry};
use thiserror::Error;

/// Errors surfaced by the conversation store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("conversation not found: {0}")]
    NotFound(String),

    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Persistence for conversations and their message history
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create an empty conversation under the given id
    async fn create(&self, id: &str) -> Result<Conversation, StoreError>;

    /// Fetch a conversation, `None` when the id is unknown
    async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError>;

    /// Append a user message
    async fn append_user_message(&self, id: &str, content: &str) -> Result<(), StoreError>;

    /// Append an assistant message carrying all three stage payloads
    async fn append_assistant_message(
        &self,
        id: &str,
        stage1: &[StageOneEntry],
        stage2: &[StageTwoEntry],
        stage3: &StageThreeResult,
    ) -> Result<(), StoreError>;

    /// Replace the conversation title
    async fn set_title(&self, id: &str, title: &str) -> Result<(), StoreError>;
}
