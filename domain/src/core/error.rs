//! Domain error types

use thiserror::Error;

/// Domain-level validation errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),
}
