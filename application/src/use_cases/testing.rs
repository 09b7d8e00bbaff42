//! Shared test doubles for use-case tests

use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use council_domain::{
    Conversation, Message, Model, StageOneEntry, StageThreeResult, StageTwoEntry,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted gateway double that records every call it receives.
///
/// The stage of each call is recognized from prompt markers, so the
/// call log can assert which stages ran and how often.
#[derive(Default)]
pub(crate) struct MockGateway {
    answers: HashMap<String, Result<String, String>>,
    rankings: HashMap<String, Result<String, String>>,
    ranking_default: Option<Result<String, String>>,
    synthesis: Option<Result<String, String>>,
    title: Option<Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, model: Model, text: &str) -> Self {
        self.answers.insert(model.to_string(), Ok(text.to_string()));
        self
    }

    pub fn answer_error(mut self, model: Model, error: &str) -> Self {
        self.answers
            .insert(model.to_string(), Err(error.to_string()));
        self
    }

    pub fn ranking(mut self, model: Model, text: &str) -> Self {
        self.rankings
            .insert(model.to_string(), Ok(text.to_string()));
        self
    }

    pub fn ranking_all(mut self, text: &str) -> Self {
        self.ranking_default = Some(Ok(text.to_string()));
        self
    }

    pub fn ranking_error_all(mut self, error: &str) -> Self {
        self.ranking_default = Some(Err(error.to_string()));
        self
    }

    pub fn synthesis(mut self, text: &str) -> Self {
        self.synthesis = Some(Ok(text.to_string()));
        self
    }

    pub fn synthesis_error(mut self, error: &str) -> Self {
        self.synthesis = Some(Err(error.to_string()));
        self
    }

    pub fn title(mut self, text: &str) -> Self {
        self.title = Some(Ok(text.to_string()));
        self
    }

    pub fn title_error(mut self, error: &str) -> Self {
        self.title = Some(Err(error.to_string()));
        self
    }

    /// Number of recorded calls of one kind ("answer", "rank",
    /// "synthesize", "title")
    pub fn calls_for(&self, kind: &str) -> usize {
        let prefix = format!("{}:", kind);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .count()
    }

    fn kind_of(request: &CompletionRequest) -> &'static str {
        if request.prompt.contains("Rank ALL of the responses") {
            "rank"
        } else if request.prompt.contains("Council answers:") {
            "synthesize"
        } else if request.prompt.contains("Write a title for a conversation") {
            "title"
        } else {
            "answer"
        }
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn complete(
        &self,
        model: &Model,
        request: CompletionRequest,
    ) -> Result<String, GatewayError> {
        let kind = Self::kind_of(&request);
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", kind, model));

        let scripted = match kind {
            "answer" => self.answers.get(model.as_str()).cloned(),
            "rank" => self
                .rankings
                .get(model.as_str())
                .cloned()
                .or_else(|| self.ranking_default.clone()),
            "synthesize" => self.synthesis.clone(),
            _ => self.title.clone(),
        };

        match scripted {
            Some(Ok(text)) => Ok(text),
            Some(Err(error)) => Err(GatewayError::Other(error)),
            None => Err(GatewayError::Other(format!(
                "no scripted {} reply for {}",
                kind, model
            ))),
        }
    }
}

/// In-memory conversation store double
#[derive(Default)]
pub(crate) struct InMemoryStore {
    conversations: Mutex<HashMap<String, Conversation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_of(&self, id: &str) -> Option<String> {
        self.conversations
            .lock()
            .unwrap()
            .get(id)
            .map(|c| c.title.clone())
    }

    pub fn messages_of(&self, id: &str) -> Vec<Message> {
        self.conversations
            .lock()
            .unwrap()
            .get(id)
            .map(|c| c.messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn create(&self, id: &str) -> Result<Conversation, StoreError> {
        let conversation = Conversation::new(id);
        self.conversations
            .lock()
            .unwrap()
            .insert(id.to_string(), conversation.clone());
        Ok(conversation)
    }

    async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        Ok(self.conversations.lock().unwrap().get(id).cloned())
    }

    async fn append_user_message(&self, id: &str, content: &str) -> Result<(), StoreError> {
        let mut conversations = self.conversations.lock().unwrap();
        let conversation = conversations
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conversation.messages.push(Message::user(content));
        Ok(())
    }

    async fn append_assistant_message(
        &self,
        id: &str,
        stage1: &[StageOneEntry],
        stage2: &[StageTwoEntry],
        stage3: &StageThreeResult,
    ) -> Result<(), StoreError> {
        let mut conversations = self.conversations.lock().unwrap();
        let conversation = conversations
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conversation.messages.push(Message::assistant(
            stage1.to_vec(),
            stage2.to_vec(),
            stage3.clone(),
        ));
        Ok(())
    }

    async fn set_title(&self, id: &str, title: &str) -> Result<(), StoreError> {
        let mut conversations = self.conversations.lock().unwrap();
        let conversation = conversations
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conversation.title = title.to_string();
        Ok(())
    }
}
