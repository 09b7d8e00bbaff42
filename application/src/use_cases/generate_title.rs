//! Generate Title use case
//!
//! Fire-and-forget side task: summarize the first user message of a
//! conversation into a short title with a cheap model. Failure is
//! non-fatal everywhere this is used - the conversation simply keeps
//! its placeholder title.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use council_domain::{Model, PromptTemplate, conversation::entities::DEFAULT_TITLE};
use std::sync::Arc;
use tracing::debug;

/// Longest title we will store, in characters
const MAX_TITLE_CHARS: usize = 60;

/// Use case for generating a conversation title
pub struct GenerateTitleUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
}

impl<G: LlmGateway + 'static> Clone for GenerateTitleUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            model: self.model.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> GenerateTitleUseCase<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self { gateway, model }
    }

    /// Produce a cleaned title for a conversation opened by `first_message`
    pub async fn execute(&self, first_message: &str) -> Result<String, GatewayError> {
        let request = CompletionRequest::new(PromptTemplate::title_prompt(first_message))
            .with_system(PromptTemplate::title_system());

        let raw = self.gateway.complete(&self.model, request).await?;
        let title = clean_title(&raw);
        debug!(model = %self.model, title = %title, "Generated conversation title");
        Ok(title)
    }
}

/// Normalize a model-written title: first line only, wrapping quotes
/// stripped, bounded length. Falls back to the placeholder when the
/// reply cleans down to nothing.
pub fn clean_title(raw: &str) -> String {
    let line = raw.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let trimmed = line.trim().trim_matches(['"', '\'', '\u{201c}', '\u{201d}']);
    let trimmed = trimmed.trim_end_matches(['.', '!']).trim();

    if trimmed.is_empty() {
        return DEFAULT_TITLE.to_string();
    }

    if trimmed.chars().count() <= MAX_TITLE_CHARS {
        trimmed.to_string()
    } else {
        let mut title: String = trimmed.chars().take(MAX_TITLE_CHARS).collect();
        title.push('…');
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::MockGateway;

    #[test]
    fn test_clean_title_strips_quotes_and_punctuation() {
        assert_eq!(clean_title("\"Tuning a Guitar\""), "Tuning a Guitar");
        assert_eq!(clean_title("Tuning a Guitar.\n"), "Tuning a Guitar");
        assert_eq!(clean_title("\u{201c}Sky Color\u{201d}"), "Sky Color");
    }

    #[test]
    fn test_clean_title_takes_first_nonempty_line() {
        assert_eq!(clean_title("\n\nBest Title\nextra commentary"), "Best Title");
    }

    #[test]
    fn test_clean_title_bounds_length() {
        let long = "x".repeat(200);
        let title = clean_title(&long);
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS + 1);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn test_clean_title_empty_falls_back() {
        assert_eq!(clean_title("   \n  "), DEFAULT_TITLE);
        assert_eq!(clean_title("\"\""), DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn test_execute_cleans_model_reply() {
        let gateway = Arc::new(MockGateway::new().title("\"Guitar Tuning Help\""));
        let use_case = GenerateTitleUseCase::new(gateway, Model::Gemini25Flash);

        let title = use_case.execute("How do I tune a guitar?").await.unwrap();
        assert_eq!(title, "Guitar Tuning Help");
    }

    #[tokio::test]
    async fn test_execute_propagates_gateway_error() {
        let gateway = Arc::new(MockGateway::new().title_error("quota exceeded"));
        let use_case = GenerateTitleUseCase::new(gateway, Model::Gemini25Flash);

        assert!(use_case.execute("hello").await.is_err());
    }
}
