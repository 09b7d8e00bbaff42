//! Council roster - role-based model configuration for one deliberation

use super::super::core::model::Model;
use serde::{Deserialize, Serialize};

/// The fixed set of models taking part in a deliberation (Value Object)
///
/// `members` answer in Stage 1 and double as the judges in Stage 2 (a
/// judge may rank its own anonymized answer; there is no self-exclusion).
/// The `synthesizer` produces the Stage 3 final answer and the
/// `title_model` handles the fire-and-forget conversation title.
///
/// The member order is significant: it drives label assignment and the
/// deterministic tie-break in the aggregate ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilRoster {
    /// Council members, in configuration order
    pub members: Vec<Model>,
    /// Model that synthesizes the final answer
    pub synthesizer: Model,
    /// Model used for conversation title generation
    pub title_model: Model,
}

impl CouncilRoster {
    pub fn new(members: Vec<Model>) -> Self {
        Self {
            members,
            synthesizer: Model::default_synthesizer(),
            title_model: Model::default_title_model(),
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: Model) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn with_title_model(mut self, title_model: Model) -> Self {
        self.title_model = title_model;
        self
    }

    /// The Stage 2 judge set (same models as Stage 1)
    pub fn judges(&self) -> &[Model] {
        &self.members
    }

    /// Position of a model in configuration order, if it is a member
    pub fn position(&self, model: &Model) -> Option<usize> {
        self.members.iter().position(|m| m == model)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for CouncilRoster {
    fn default() -> Self {
        Self::new(Model::default_council())
    }
}
