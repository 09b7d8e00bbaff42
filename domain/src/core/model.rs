//! Model value object representing an LLM backend

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// This is a domain concept representing the models that can sit on a
/// council. Identifiers follow the OpenRouter `provider/model` naming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI models
    Gpt51,
    Gpt51Mini,
    // Google models
    Gemini3Pro,
    Gemini25Flash,
    // Anthropic models
    ClaudeSonnet45,
    ClaudeOpus45,
    // xAI models
    Grok4,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt51 => "openai/gpt-5.1",
            Model::Gpt51Mini => "openai/gpt-5.1-mini",
            Model::Gemini3Pro => "google/gemini-3-pro-preview",
            Model::Gemini25Flash => "google/gemini-2.5-flash",
            Model::ClaudeSonnet45 => "anthropic/claude-sonnet-4.5",
            Model::ClaudeOpus45 => "anthropic/claude-opus-4.5",
            Model::Grok4 => "x-ai/grok-4",
            Model::Custom(s) => s,
        }
    }

    /// Get the default council membership
    pub fn default_council() -> Vec<Model> {
        vec![
            Model::Gpt51,
            Model::Gemini3Pro,
            Model::ClaudeSonnet45,
            Model::Grok4,
        ]
    }

    /// Default synthesizer model for Stage 3
    pub fn default_synthesizer() -> Model {
        Model::Gemini3Pro
    }

    /// Default (cheap) model for conversation title generation
    pub fn default_title_model() -> Model {
        Model::Gemini25Flash
    }

    /// Get a short display name without the provider prefix
    ///
    /// E.g., "openai/gpt-5.1" -> "gpt-5.1"
    pub fn short_name(&self) -> &str {
        let s = self.as_str();
        s.rsplit('/').next().unwrap_or(s)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s {
            "openai/gpt-5.1" => Model::Gpt51,
            "openai/gpt-5.1-mini" => Model::Gpt51Mini,
            "google/gemini-3-pro-preview" => Model::Gemini3Pro,
            "google/gemini-2.5-flash" => Model::Gemini25Flash,
            "anthropic/claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "anthropic/claude-opus-4.5" => Model::ClaudeOpus45,
            "x-ai/grok-4" => Model::Grok4,
            other => Model::Custom(other.to_string()),
        }
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::default_council() {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "meta/llama-5-behemoth".parse().unwrap();
        assert_eq!(model, Model::Custom("meta/llama-5-behemoth".to_string()));
        assert_eq!(model.to_string(), "meta/llama-5-behemoth");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(Model::Gpt51.short_name(), "gpt-5.1");
        assert_eq!(Model::Grok4.short_name(), "grok-4");
        let custom: Model = "no-provider-prefix".parse().unwrap();
        assert_eq!(custom.short_name(), "no-provider-prefix");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::ClaudeSonnet45).unwrap();
        assert_eq!(json, "\"anthropic/claude-sonnet-4.5\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::ClaudeSonnet45);
    }
}
