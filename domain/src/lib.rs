//! Domain layer for llm-council
//!
//! This crate contains the core deliberation logic and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council deliberation answers one user prompt in three stages:
//!
//! - **Stage 1 — Response Collection**: every council member answers
//!   the prompt independently
//! - **Stage 2 — Peer Ranking**: each member ranks the anonymized
//!   answers of the whole council
//! - **Stage 3 — Synthesis**: a designated synthesizer folds the
//!   answers and the consensus ranking into the final response
//!
//! Everything in this crate is pure: label assignment, ranking
//! extraction, and rank aggregation are plain functions over value
//! objects, unit-testable without any network access.

pub mod conversation;
pub mod core;
pub mod council;
pub mod prompt;

// Re-export commonly used types
pub use conversation::{Conversation, Message};
pub use core::{error::DomainError, model::Model, prompt::UserPrompt};
pub use council::{
    AggregateRanking, CouncilEvent, CouncilResult, CouncilRoster, DeliberationMetadata, Label,
    LabelMapping, StageOneEntry, StageThreeResult, StageTwoEntry, TitleData, aggregate_rankings,
    extract_ranked_labels,
};
pub use prompt::PromptTemplate;
