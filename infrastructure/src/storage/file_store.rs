//! JSON file conversation store
//!
//! One pretty-printed JSON document per conversation, named `{id}.json`
//! under the data directory. Every file access goes through a single
//! mutex: writes are read-modify-replace under the lock, and reads take
//! the same lock so they never observe a half-written document.

use async_trait::async_trait;
use council_application::ports::conversation_store::{ConversationStore, StoreError};
use council_domain::{
    Conversation, Message, StageOneEntry, StageThreeResult, StageTwoEntry,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Conversation store backed by one JSON file per conversation
pub struct FileConversationStore {
    data_dir: PathBuf,
    lock: Mutex<()>,
}

impl FileConversationStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Self {
            data_dir,
            lock: Mutex::new(()),
        })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", id))
    }

    fn acquire(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock
            .lock()
            .map_err(|_| StoreError::Io("store lock poisoned".to_string()))
    }

    // Callers must hold the lock
    fn read(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
        let conversation =
            serde_json::from_str(&raw).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Some(conversation))
    }

    fn write(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(conversation)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(self.path_for(&conversation.id), raw)
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    fn update(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Conversation),
    ) -> Result<(), StoreError> {
        let guard = self.acquire()?;
        let mut conversation = self
            .read(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        apply(&mut conversation);
        self.write(&conversation)?;
        drop(guard);
        Ok(())
    }

    /// List all stored conversation ids (unordered)
    pub fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        let entries =
            std::fs::read_dir(&self.data_dir).map_err(|e| StoreError::Io(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }
        Ok(ids)
    }
}

#[async_trait]
impl ConversationStore for FileConversationStore {
    async fn create(&self, id: &str) -> Result<Conversation, StoreError> {
        let guard = self.acquire()?;
        let conversation = Conversation::new(id);
        self.write(&conversation)?;
        drop(guard);
        debug!(conversation = %id, "Created conversation");
        Ok(conversation)
    }

    async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        let guard = self.acquire()?;
        let conversation = self.read(id);
        drop(guard);
        conversation
    }

    async fn append_user_message(&self, id: &str, content: &str) -> Result<(), StoreError> {
        let content = content.to_string();
        self.update(id, |conversation| {
            conversation.messages.push(Message::user(content));
        })
    }

    async fn append_assistant_message(
        &self,
        id: &str,
        stage1: &[StageOneEntry],
        stage2: &[StageTwoEntry],
        stage3: &StageThreeResult,
    ) -> Result<(), StoreError> {
        let message = Message::assistant(stage1.to_vec(), stage2.to_vec(), stage3.clone());
        self.update(id, |conversation| {
            conversation.messages.push(message);
        })
    }

    async fn set_title(&self, id: &str, title: &str) -> Result<(), StoreError> {
        let title = title.to_string();
        self.update(id, |conversation| {
            conversation.title = title;
        })
    }
}
