//! LLM Gateway port
//!
//! Defines the interface for completing a prompt against one remote
//! model. One call, one completion: retry policy, if any, belongs to
//! the caller, and in this design none is applied - a failed call
//! yields one failure record and the model sits out the later stages.

use async_trait::async_trait;
use council_domain::Model;
use thiserror::Error;

/// Errors that can occur during a model completion call
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("model endpoint returned {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("malformed response payload: {0}")]
    MalformedResponse(String),

    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    #[error("{0}")]
    Other(String),
}

/// A single completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The user-role prompt
    pub prompt: String,
    /// Optional system instructions
    pub system: Option<String>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to model
/// backends. Model-scoped configuration (endpoint, credentials) is
/// supplied to the adapter at startup, not per call.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Complete a prompt with the given model, returning the reply text
    async fn complete(
        &self,
        model: &Model,
        request: CompletionRequest,
    ) -> Result<String, GatewayError>;
}
