//! Run Council use case - the deliberation orchestrator
//!
//! Sequences the three stages (collect → rank → synthesize), enforcing
//! stage ordering and the failure policy: per-model failures are data,
//! whole-stage failures abort the deliberation. Exposes a blocking
//! interface returning the full bundle and a streaming interface
//! emitting one event per stage transition.
//!
//! Concurrency within a stage is a fan-out/fan-in barrier: every call
//! is spawned before any is awaited, each task writes exactly one
//! index-addressed result slot, and the stage result is assembled only
//! after every task has settled. Later stages never observe a partial
//! stage.

use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use council_domain::{
    CouncilEvent, CouncilResult, CouncilRoster, DeliberationMetadata, Label, LabelMapping, Model,
    PromptTemplate, StageOneEntry, StageThreeResult, StageTwoEntry, UserPrompt,
    aggregate_rankings, extract_ranked_labels,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort a deliberation
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("no council members configured")]
    NoMembers,

    #[error("all council members failed to answer")]
    AllModelsFailed,

    #[error("all judges failed to produce a ranking")]
    AllJudgesFailed,

    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),
}

/// Input for one deliberation
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The user prompt to deliberate
    pub prompt: UserPrompt,
    /// The fixed model roster for this deliberation
    pub roster: CouncilRoster,
}

impl RunCouncilInput {
    pub fn new(prompt: impl Into<UserPrompt>, roster: CouncilRoster) -> Self {
        Self {
            prompt: prompt.into(),
            roster,
        }
    }
}

/// Use case for running one council deliberation
pub struct RunCouncilUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> Clone for RunCouncilUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: LlmGateway + 'static> RunCouncilUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run all three stages and return the complete bundle.
    ///
    /// A synthesizer failure does not discard earlier stages: the
    /// bundle is still returned with an error-flagged Stage 3 result.
    pub async fn execute(&self, input: RunCouncilInput) -> Result<CouncilResult, RunCouncilError> {
        if input.roster.is_empty() {
            return Err(RunCouncilError::NoMembers);
        }

        info!(
            members = input.roster.members.len(),
            "Starting council deliberation"
        );

        let stage1 = self.stage1_collect(&input).await?;
        let mapping = LabelMapping::from_stage_one(&stage1);
        let (stage2, metadata) = self.stage2_rank(&input, &mapping, &stage1).await?;
        let stage3 = self
            .stage3_synthesize(&input, &mapping, &stage1, &stage2, &metadata)
            .await;

        Ok(CouncilResult {
            stage1,
            stage2,
            stage3,
            metadata,
        })
    }

    /// Run the deliberation, emitting an ordered event per stage.
    ///
    /// The stream terminates with `complete`, or with a single `error`
    /// event at the first fatal condition. If the receiver is dropped,
    /// in-flight model calls still settle; their results are discarded.
    pub fn execute_streaming(&self, input: RunCouncilInput) -> mpsc::Receiver<CouncilEvent> {
        let (tx, rx) = mpsc::channel(16);
        let this = self.clone();
        tokio::spawn(async move {
            this.stream_pipeline(input, tx).await;
        });
        rx
    }

    async fn stream_pipeline(&self, input: RunCouncilInput, tx: mpsc::Sender<CouncilEvent>) {
        if input.roster.is_empty() {
            let _ = tx
                .send(CouncilEvent::Error {
                    message: RunCouncilError::NoMembers.to_string(),
                })
                .await;
            return;
        }

        macro_rules! emit {
            ($event:expr) => {
                if tx.send($event).await.is_err() {
                    debug!("stream receiver dropped, discarding deliberation");
                    return;
                }
            };
        }

        emit!(CouncilEvent::Stage1Start);
        let stage1 = match self.stage1_collect(&input).await {
            Ok(entries) => entries,
            Err(e) => {
                emit!(CouncilEvent::Error {
                    message: e.to_string(),
                });
                return;
            }
        };
        emit!(CouncilEvent::Stage1Complete {
            data: stage1.clone(),
        });

        emit!(CouncilEvent::Stage2Start);
        let mapping = LabelMapping::from_stage_one(&stage1);
        let (stage2, metadata) = match self.stage2_rank(&input, &mapping, &stage1).await {
            Ok(pair) => pair,
            Err(e) => {
                emit!(CouncilEvent::Error {
                    message: e.to_string(),
                });
                return;
            }
        };
        emit!(CouncilEvent::Stage2Complete {
            data: stage2.clone(),
            metadata: metadata.clone(),
        });

        emit!(CouncilEvent::Stage3Start);
        let stage3 = self
            .stage3_synthesize(&input, &mapping, &stage1, &stage2, &metadata)
            .await;
        if let Some(cause) = stage3.error.clone() {
            emit!(CouncilEvent::Error {
                message: RunCouncilError::SynthesisFailed(cause).to_string(),
            });
        } else {
            emit!(CouncilEvent::Stage3Complete { data: stage3 });
            emit!(CouncilEvent::Complete);
        }
    }

    /// Stage 1: every member answers the prompt concurrently.
    ///
    /// Produces exactly one entry per configured member, in configured
    /// order. Fatal only when no member answered at all.
    pub(crate) async fn stage1_collect(
        &self,
        input: &RunCouncilInput,
    ) -> Result<Vec<StageOneEntry>, RunCouncilError> {
        info!("Stage 1: collecting responses");

        let mut join_set = JoinSet::new();
        for (slot, model) in input.roster.members.iter().cloned().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let request = CompletionRequest::new(PromptTemplate::answer_prompt(
                input.prompt.content(),
            ))
            .with_system(PromptTemplate::answer_system());

            join_set.spawn(async move {
                let result = gateway.complete(&model, request).await;
                (slot, model, result)
            });
        }

        let mut slots: Vec<Option<StageOneEntry>> =
            input.roster.members.iter().map(|_| None).collect();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, model, Ok(content))) => {
                    info!(%model, "Council member answered");
                    slots[slot] = Some(StageOneEntry::answered(model, content));
                }
                Ok((slot, model, Err(e))) => {
                    warn!(%model, error = %e, "Council member failed");
                    slots[slot] = Some(StageOneEntry::failed(model, e.to_string()));
                }
                Err(e) => {
                    warn!("Stage 1 task join error: {}", e);
                }
            }
        }

        let entries: Vec<StageOneEntry> = slots
            .into_iter()
            .zip(input.roster.members.iter())
            .map(|(slot, model)| {
                slot.unwrap_or_else(|| {
                    StageOneEntry::failed(model.clone(), "model task did not complete")
                })
            })
            .collect();

        if entries.iter().all(|e| !e.is_success()) {
            return Err(RunCouncilError::AllModelsFailed);
        }
        Ok(entries)
    }

    /// Stage 2: every judge ranks the anonymized answers concurrently.
    ///
    /// Each judge's free-form reply is reduced to an ordered label list
    /// by the tolerant parser; an unusable reply becomes a parse
    /// failure with the raw text kept. Fatal only when every judge
    /// entry carries an error.
    pub(crate) async fn stage2_rank(
        &self,
        input: &RunCouncilInput,
        mapping: &LabelMapping,
        stage1: &[StageOneEntry],
    ) -> Result<(Vec<StageTwoEntry>, DeliberationMetadata), RunCouncilError> {
        info!("Stage 2: collecting rankings");

        let anonymized = mapping.anonymized_responses(stage1);
        let ranking_prompt =
            PromptTemplate::ranking_prompt(input.prompt.content(), &anonymized);
        let known_labels: Vec<Label> = mapping.labels();

        let mut join_set = JoinSet::new();
        for (slot, judge) in input.roster.judges().iter().cloned().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let request = CompletionRequest::new(ranking_prompt.clone())
                .with_system(PromptTemplate::ranking_system());

            join_set.spawn(async move {
                let result = gateway.complete(&judge, request).await;
                (slot, judge, result)
            });
        }

        let judges = input.roster.judges();
        let mut slots: Vec<Option<StageTwoEntry>> = judges.iter().map(|_| None).collect();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, judge, Ok(reply))) => {
                    let ranked = extract_ranked_labels(&reply, &known_labels);
                    if ranked.is_empty() {
                        warn!(judge = %judge, "Judge reply yielded no ranking");
                        slots[slot] = Some(StageTwoEntry::parse_failed(judge, reply));
                    } else {
                        info!(judge = %judge, labels = ranked.len(), "Judge ranked");
                        slots[slot] = Some(StageTwoEntry::ranked(judge, ranked, reply));
                    }
                }
                Ok((slot, judge, Err(e))) => {
                    warn!(judge = %judge, error = %e, "Judge failed");
                    slots[slot] = Some(StageTwoEntry::failed(judge, e.to_string()));
                }
                Err(e) => {
                    warn!("Stage 2 task join error: {}", e);
                }
            }
        }

        let entries: Vec<StageTwoEntry> = slots
            .into_iter()
            .zip(judges.iter())
            .map(|(slot, judge)| {
                slot.unwrap_or_else(|| {
                    StageTwoEntry::failed(judge.clone(), "judge task did not complete")
                })
            })
            .collect();

        if entries.iter().all(|e| !e.is_success()) {
            return Err(RunCouncilError::AllJudgesFailed);
        }

        let metadata = DeliberationMetadata {
            label_to_model: mapping.clone(),
            aggregate_rankings: aggregate_rankings(&entries, mapping),
        };
        Ok((entries, metadata))
    }

    /// Stage 3: one synthesizer call over answers plus rankings.
    ///
    /// Never aborts the deliberation: a failure is recorded on the
    /// result so Stage 1/2 data survives.
    pub(crate) async fn stage3_synthesize(
        &self,
        input: &RunCouncilInput,
        mapping: &LabelMapping,
        stage1: &[StageOneEntry],
        stage2: &[StageTwoEntry],
        metadata: &DeliberationMetadata,
    ) -> StageThreeResult {
        info!("Stage 3: synthesis");

        let synthesizer: Model = input.roster.synthesizer.clone();
        let anonymized = mapping.anonymized_responses(stage1);
        let request = CompletionRequest::new(PromptTemplate::synthesis_prompt(
            input.prompt.content(),
            &anonymized,
            stage2,
            metadata,
        ))
        .with_system(PromptTemplate::synthesis_system());

        match self.gateway.complete(&synthesizer, request).await {
            Ok(content) => {
                info!(model = %synthesizer, "Synthesis complete");
                StageThreeResult::answered(synthesizer, content)
            }
            Err(e) => {
                warn!(model = %synthesizer, error = %e, "Synthesis failed");
                StageThreeResult::failed(synthesizer, e.to_string())
            }
        }
    }
}
