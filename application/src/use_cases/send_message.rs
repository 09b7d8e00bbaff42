//! Send Message use case
//!
//! Glue between the conversation store and the deliberation pipeline:
//! append the user message, run the council, persist the assistant
//! message, and - on the first message of a conversation - produce a
//! title. Offers the same blocking/streaming split as the orchestrator,
//! with persistence interleaved into the event sequence.

use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::generate_title::GenerateTitleUseCase;
use crate::use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
use council_domain::{
    CouncilEvent, CouncilResult, CouncilRoster, LabelMapping, TitleData, UserPrompt,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Errors that can occur while handling a message
#[derive(Error, Debug)]
pub enum SendMessageError {
    #[error("conversation not found: {0}")]
    ConversationNotFound(String),

    #[error(transparent)]
    Council(#[from] RunCouncilError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Use case for answering one user message inside a conversation
pub struct SendMessageUseCase<G: LlmGateway + 'static, S: ConversationStore + 'static> {
    store: Arc<S>,
    council: RunCouncilUseCase<G>,
    title: GenerateTitleUseCase<G>,
    roster: CouncilRoster,
}

impl<G: LlmGateway + 'static, S: ConversationStore + 'static> Clone for SendMessageUseCase<G, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            council: self.council.clone(),
            title: self.title.clone(),
            roster: self.roster.clone(),
        }
    }
}

impl<G: LlmGateway + 'static, S: ConversationStore + 'static> SendMessageUseCase<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>, roster: CouncilRoster) -> Self {
        Self {
            store,
            council: RunCouncilUseCase::new(Arc::clone(&gateway)),
            title: GenerateTitleUseCase::new(gateway, roster.title_model.clone()),
            roster,
        }
    }

    /// Handle a message end to end, returning the full deliberation bundle.
    ///
    /// On the first message the title is generated before the council
    /// runs; a title failure only keeps the placeholder.
    pub async fn execute(
        &self,
        conversation_id: &str,
        prompt: UserPrompt,
    ) -> Result<CouncilResult, SendMessageError> {
        let conversation = self
            .store
            .get(conversation_id)
            .await?
            .ok_or_else(|| SendMessageError::ConversationNotFound(conversation_id.to_string()))?;
        let is_first_message = conversation.is_empty();

        self.store
            .append_user_message(conversation_id, prompt.content())
            .await?;

        if is_first_message {
            match self.title.execute(prompt.content()).await {
                Ok(title) => self.store.set_title(conversation_id, &title).await?,
                Err(e) => warn!(error = %e, "Title generation failed, keeping placeholder"),
            }
        }

        let input = RunCouncilInput::new(prompt, self.roster.clone());
        let result = self.council.execute(input).await?;

        self.store
            .append_assistant_message(
                conversation_id,
                &result.stage1,
                &result.stage2,
                &result.stage3,
            )
            .await?;

        Ok(result)
    }

    /// Handle a message, streaming deliberation events as they happen.
    ///
    /// The title task (first message only) is spawned alongside Stage 1
    /// and joined only after Stage 3, so it never blocks stage
    /// progression; its event follows `stage3_complete`. Persistence of
    /// the assistant message happens before the terminal `complete`.
    pub fn execute_streaming(
        &self,
        conversation_id: &str,
        prompt: UserPrompt,
    ) -> mpsc::Receiver<CouncilEvent> {
        let (tx, rx) = mpsc::channel(16);
        let this = self.clone();
        let conversation_id = conversation_id.to_string();
        tokio::spawn(async move {
            this.stream_pipeline(conversation_id, prompt, tx).await;
        });
        rx
    }

    async fn stream_pipeline(
        &self,
        conversation_id: String,
        prompt: UserPrompt,
        tx: mpsc::Sender<CouncilEvent>,
    ) {
        macro_rules! emit {
            ($event:expr) => {
                if tx.send($event).await.is_err() {
                    debug!("stream receiver dropped, discarding deliberation");
                    return;
                }
            };
        }
        macro_rules! fatal {
            ($error:expr) => {{
                emit!(CouncilEvent::Error {
                    message: $error.to_string(),
                });
                return;
            }};
        }

        let conversation = match self.store.get(&conversation_id).await {
            Ok(Some(conversation)) => conversation,
            Ok(None) => {
                fatal!(SendMessageError::ConversationNotFound(conversation_id))
            }
            Err(e) => fatal!(e),
        };
        let is_first_message = conversation.is_empty();

        if let Err(e) = self
            .store
            .append_user_message(&conversation_id, prompt.content())
            .await
        {
            fatal!(e);
        }

        // Side task: runs across stage boundaries, joined after Stage 3
        let title_task = is_first_message.then(|| {
            let title = self.title.clone();
            let first_message = prompt.content().to_string();
            tokio::spawn(async move { title.execute(&first_message).await })
        });

        let input = RunCouncilInput::new(prompt, self.roster.clone());

        emit!(CouncilEvent::Stage1Start);
        let stage1 = match self.council.stage1_collect(&input).await {
            Ok(entries) => entries,
            Err(e) => fatal!(e),
        };
        emit!(CouncilEvent::Stage1Complete {
            data: stage1.clone(),
        });

        emit!(CouncilEvent::Stage2Start);
        let mapping = LabelMapping::from_stage_one(&stage1);
        let (stage2, metadata) = match self.council.stage2_rank(&input, &mapping, &stage1).await {
            Ok(pair) => pair,
            Err(e) => fatal!(e),
        };
        emit!(CouncilEvent::Stage2Complete {
            data: stage2.clone(),
            metadata: metadata.clone(),
        });

        emit!(CouncilEvent::Stage3Start);
        let stage3 = self
            .council
            .stage3_synthesize(&input, &mapping, &stage1, &stage2, &metadata)
            .await;
        if let Some(cause) = stage3.error.clone() {
            fatal!(RunCouncilError::SynthesisFailed(cause));
        }
        emit!(CouncilEvent::Stage3Complete {
            data: stage3.clone(),
        });

        if let Some(task) = title_task {
            match task.await {
                Ok(Ok(title)) => {
                    if let Err(e) = self.store.set_title(&conversation_id, &title).await {
                        warn!(error = %e, "Failed to persist conversation title");
                    } else {
                        emit!(CouncilEvent::TitleComplete {
                            data: TitleData { title },
                        });
                    }
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "Title generation failed, keeping placeholder")
                }
                Err(e) => warn!(error = %e, "Title task did not complete"),
            }
        }

        if let Err(e) = self
            .store
            .append_assistant_message(&conversation_id, &stage1, &stage2, &stage3)
            .await
        {
            fatal!(e);
        }

        emit!(CouncilEvent::Complete);
    }
}
