//! OpenRouter gateway adapter
//!
//! Implements [`LlmGateway`] against the OpenRouter chat completions
//! API. One request per completion, no retries and no client-side
//! timeout: a council deliberation tolerates slow members, and a failed
//! call is already handled upstream as a per-model failure record.

use async_trait::async_trait;
use council_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use council_domain::Model;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Gateway to OpenRouter-hosted models
pub struct OpenRouterGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenRouterGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn parse_reply(body: &str) -> Result<String, GatewayError> {
        let parsed: ChatResponse = serde_json::from_str(body)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                GatewayError::MalformedResponse("response carried no message content".to_string())
            })
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn complete(
        &self,
        model: &Model,
        request: CompletionRequest,
    ) -> Result<String, GatewayError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let payload = ChatRequest {
            model: model.as_str(),
            messages,
        };

        debug!(model = %model, "Sending completion request");
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        Self::parse_reply(&body)
    }
}
