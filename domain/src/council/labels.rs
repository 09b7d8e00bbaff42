//! Label Mapper - anonymous authorship labels for peer ranking
//!
//! Judges must never learn which model wrote which answer, so every
//! successful Stage 1 entry is assigned an anonymous label ("Response A",
//! "Response B", ...) before the ranking prompt is built. The mapping is
//! computed exactly once per deliberation, immediately after Stage 1
//! settles, and is read-only afterwards.

use super::entries::StageOneEntry;
use crate::core::model::Model;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An anonymous label standing in for a model's identity (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Label for the n-th successful response (0-indexed): "Response A",
    /// "Response B", ... continuing "Response AA", "Response AB" past 25
    pub fn from_index(index: usize) -> Self {
        let mut letters = String::new();
        let mut n = index + 1;
        while n > 0 {
            n -= 1;
            letters.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        Label(format!("Response {}", letters))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bijection between anonymous labels and models (Value Object)
///
/// Covers only models with a *successful* Stage 1 entry, in configured
/// model order, so repeated runs over the same success set produce the
/// same assignment. Serialized as a JSON object `{"Response A": "model"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMapping {
    pairs: Vec<(Label, Model)>,
}

impl LabelMapping {
    /// Build the mapping from Stage 1 entries, skipping failed ones.
    ///
    /// Entries are expected in configured model order; labels are handed
    /// out in that same order.
    pub fn from_stage_one(entries: &[StageOneEntry]) -> Self {
        let pairs = entries
            .iter()
            .filter(|e| e.is_success())
            .enumerate()
            .map(|(i, e)| (Label::from_index(i), e.model.clone()))
            .collect();
        Self { pairs }
    }

    /// The model behind a label
    pub fn model_for(&self, label: &Label) -> Option<&Model> {
        self.pairs.iter().find(|(l, _)| l == label).map(|(_, m)| m)
    }

    /// The label assigned to a model
    pub fn label_for(&self, model: &Model) -> Option<&Label> {
        self.pairs.iter().find(|(_, m)| m == model).map(|(l, _)| l)
    }

    /// All labels, in assignment order
    pub fn labels(&self) -> Vec<Label> {
        self.pairs.iter().map(|(l, _)| l.clone()).collect()
    }

    /// Iterate over (label, model) pairs in assignment order
    pub fn iter(&self) -> impl Iterator<Item = &(Label, Model)> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Anonymized `(label, content)` blocks for the ranking prompt.
    ///
    /// Contains no model name or ordering hint beyond the label itself.
    pub fn anonymized_responses<'a>(
        &self,
        entries: &'a [StageOneEntry],
    ) -> Vec<(Label, &'a str)> {
        self.pairs
            .iter()
            .filter_map(|(label, model)| {
                entries
                    .iter()
                    .find(|e| &e.model == model && e.is_success())
                    .map(|e| (label.clone(), e.content.as_str()))
            })
            .collect()
    }
}

impl Serialize for LabelMapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (label, model) in &self.pairs {
            map.serialize_entry(label.as_str(), model.as_str())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = LabelMapping;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of label to model id")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some((label, model)) = access.next_entry::<String, String>()? {
                    pairs.push((Label(label), Model::from(model.as_str())));
                }
                Ok(LabelMapping { pairs })
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
