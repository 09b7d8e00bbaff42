//! Streaming protocol events for a council deliberation
//!
//! A streaming run emits a `*_start`/`*_complete` pair around each stage,
//! optionally a title event, and a terminal `complete` - or a terminal
//! `error` substituting for any later event when a fatal condition hits.
//! Each event serializes to one JSON object `{"type": ..., "data": ...,
//! "metadata": ...}` suitable for newline-delimited transport.

use super::entries::{DeliberationMetadata, StageOneEntry, StageThreeResult, StageTwoEntry};
use serde::{Deserialize, Serialize};

/// Payload of the `title_complete` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleData {
    pub title: String,
}

/// One event in the deliberation stream, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouncilEvent {
    Stage1Start,
    Stage1Complete { data: Vec<StageOneEntry> },
    Stage2Start,
    Stage2Complete {
        data: Vec<StageTwoEntry>,
        metadata: DeliberationMetadata,
    },
    Stage3Start,
    Stage3Complete { data: StageThreeResult },
    TitleComplete { data: TitleData },
    Complete,
    Error { message: String },
}

impl CouncilEvent {
    /// The wire tag for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            CouncilEvent::Stage1Start => "stage1_start",
            CouncilEvent::Stage1Complete { .. } => "stage1_complete",
            CouncilEvent::Stage2Start => "stage2_start",
            CouncilEvent::Stage2Complete { .. } => "stage2_complete",
            CouncilEvent::Stage3Start => "stage3_start",
            CouncilEvent::Stage3Complete { .. } => "stage3_complete",
            CouncilEvent::TitleComplete { .. } => "title_complete",
            CouncilEvent::Complete => "complete",
            CouncilEvent::Error { .. } => "error",
        }
    }

    /// Whether this event closes the stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilEvent::Complete | CouncilEvent::Error { .. })
    }

    /// Serialize to a single newline-terminated JSON line
    pub fn to_json_line(&self) -> String {
        let mut line = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        line.push('\n');
        line
    }
}
