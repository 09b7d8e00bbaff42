//! Council deliberation types and pure logic
//!
//! One deliberation flows strictly Stage 1 → Label Mapper → Stage 2 →
//! Rank Aggregator → Stage 3. This module holds the immutable value
//! objects produced by each stage plus the pure functions between them:
//! label assignment, ranking extraction, and rank aggregation.

pub mod entries;
pub mod labels;
pub mod parsing;
pub mod ranking;
pub mod roster;
pub mod stream;

pub use entries::{
    AggregateRanking, CouncilResult, DeliberationMetadata, StageOneEntry, StageThreeResult,
    StageTwoEntry,
};
pub use labels::{Label, LabelMapping};
pub use parsing::extract_ranked_labels;
pub use ranking::aggregate_rankings;
pub use roster::CouncilRoster;
pub use stream::{CouncilEvent, TitleData};
