//! UserPrompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user prompt to be deliberated by the council (Value Object)
///
/// Guaranteed non-empty; every stage of the pipeline receives this
/// same immutable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrompt {
    content: String,
}

impl UserPrompt {
    /// Create a new prompt
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Prompt cannot be empty");
        Self { content }
    }

    /// Try to create a new prompt, rejecting empty content
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::InvalidPrompt(
                "prompt must not be empty".to_string(),
            ))
        } else {
            Ok(Self { content })
        }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for UserPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for UserPrompt {
    fn from(s: &str) -> Self {
        UserPrompt::new(s)
    }
}

impl From<String> for UserPrompt {
    fn from(s: String) -> Self {
        UserPrompt::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let p = UserPrompt::new("Why is the sky blue?");
        assert_eq!(p.content(), "Why is the sky blue?");
    }

    #[test]
    #[should_panic]
    fn test_empty_prompt_panics() {
        UserPrompt::new("   ");
    }

    #[test]
    fn test_try_new() {
        assert!(UserPrompt::try_new("").is_err());
        assert!(UserPrompt::try_new("  \n ").is_err());
        assert!(UserPrompt::try_new("hello").is_ok());
    }
}
