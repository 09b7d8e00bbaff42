//! Immutable result value objects for each deliberation stage
//!
//! - [`StageOneEntry`] - one council member's answer (or failure)
//! - [`StageTwoEntry`] - one judge's ranking over anonymized answers
//! - [`StageThreeResult`] - the synthesizer's final answer
//! - [`AggregateRanking`] - one row of the consensus ordering
//! - [`CouncilResult`] - complete bundle returned by a blocking run
//!
//! Entries are created exactly once by their stage and never mutated;
//! per-call failures are recorded in the `error` field rather than
//! propagated as errors across stage boundaries.

use super::labels::{Label, LabelMapping};
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Answer from a single council member in Stage 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOneEntry {
    /// The model that produced (or failed to produce) this answer
    pub model: Model,
    /// The answer content; empty when the call failed
    pub content: String,
    /// Error message if the model call failed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl StageOneEntry {
    /// Creates a successful entry holding the model's answer.
    pub fn answered(model: Model, content: impl Into<String>) -> Self {
        Self {
            model,
            content: content.into(),
            error: None,
        }
    }

    /// Creates a failed entry; the model is excluded from later stages.
    pub fn failed(model: Model, error: impl Into<String>) -> Self {
        Self {
            model,
            content: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// One judge's ordered preference over the anonymized answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTwoEntry {
    /// The model acting as judge
    pub judge: Model,
    /// Labels in the judge's preferred order; possibly a partial
    /// permutation when parsing only recovered some labels
    pub ordered_labels: Vec<Label>,
    /// The judge's verbatim reply, kept for display and debugging
    pub raw_text: String,
    /// Error message if the call failed or no ranking could be extracted
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl StageTwoEntry {
    /// Creates an entry for a judge whose reply yielded a usable ranking.
    pub fn ranked(judge: Model, ordered_labels: Vec<Label>, raw_text: impl Into<String>) -> Self {
        Self {
            judge,
            ordered_labels,
            raw_text: raw_text.into(),
            error: None,
        }
    }

    /// Creates an entry for a judge whose model call failed.
    pub fn failed(judge: Model, error: impl Into<String>) -> Self {
        Self {
            judge,
            ordered_labels: Vec::new(),
            raw_text: String::new(),
            error: Some(error.into()),
        }
    }

    /// Creates an entry for a reply that could not be reduced to a
    /// ranking; the raw text is preserved.
    pub fn parse_failed(judge: Model, raw_text: impl Into<String>) -> Self {
        Self {
            judge,
            ordered_labels: Vec::new(),
            raw_text: raw_text.into(),
            error: Some("no ranking could be parsed from the reply".to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Final synthesized answer from Stage 3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageThreeResult {
    /// The synthesizer model
    pub model: Model,
    /// The final answer; empty when synthesis failed
    pub content: String,
    /// Error message if the synthesizer call failed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl StageThreeResult {
    pub fn answered(model: Model, content: impl Into<String>) -> Self {
        Self {
            model,
            content: content.into(),
            error: None,
        }
    }

    pub fn failed(model: Model, error: impl Into<String>) -> Self {
        Self {
            model,
            content: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// One row of the consensus ranking, derived by the rank aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRanking {
    /// The model being ranked
    pub model: Model,
    /// Total inverse-position points across all judges
    pub score: u32,
    /// Competition rank: equal scores share a rank, the next distinct
    /// score ranks 1 + number of entries strictly ahead
    pub rank: usize,
}

/// Deliberation metadata exposed alongside Stage 2 results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationMetadata {
    /// The label-to-model bijection used for anonymization
    pub label_to_model: LabelMapping,
    /// Consensus ordering, best first
    pub aggregate_rankings: Vec<AggregateRanking>,
}

/// Complete result of one council deliberation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilResult {
    /// Stage 1: one entry per configured member
    pub stage1: Vec<StageOneEntry>,
    /// Stage 2: one entry per judge
    pub stage2: Vec<StageTwoEntry>,
    /// Stage 3: the final answer
    pub stage3: StageThreeResult,
    /// Label mapping and consensus ranking
    pub metadata: DeliberationMetadata,
}

impl CouncilResult {
    /// Iterator over only the successful Stage 1 answers.
    pub fn successful_answers(&self) -> impl Iterator<Item = &StageOneEntry> {
        self.stage1.iter().filter(|e| e.is_success())
    }

    /// Iterator over only the failed Stage 1 answers.
    pub fn failed_answers(&self) -> impl Iterator<Item = &StageOneEntry> {
        self.stage1.iter().filter(|e| !e.is_success())
    }
}
