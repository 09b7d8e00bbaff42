//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types at the
//! wiring seam.

use council_domain::{CouncilRoster, Model};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw council configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Member model names, in deliberation order
    pub members: Vec<String>,
    /// Model that synthesizes the final answer
    pub synthesizer: String,
    /// Model used for conversation title generation
    pub title_model: String,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            members: Model::default_council()
                .iter()
                .map(|m| m.to_string())
                .collect(),
            synthesizer: Model::default_synthesizer().to_string(),
            title_model: Model::default_title_model().to_string(),
        }
    }
}

impl FileCouncilConfig {
    /// Convert the raw model names into a roster
    pub fn roster(&self) -> CouncilRoster {
        CouncilRoster::new(
            self.members
                .iter()
                .map(|name| Model::from(name.as_str()))
                .collect(),
        )
        .with_synthesizer(Model::from(self.synthesizer.as_str()))
        .with_title_model(Model::from(self.title_model.as_str()))
    }
}

/// Raw OpenRouter configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenRouterConfig {
    /// API key; falls back to the OPENROUTER_API_KEY environment variable
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
}

impl Default for FileOpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://openrouter.ai/api/v1".to_string(),
        }
    }
}

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Conversation data directory; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Resolve the effective data directory
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("llm-council")
                .join("conversations")
        })
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub council: FileCouncilConfig,
    pub openrouter: FileOpenRouterConfig,
    pub storage: FileStorageConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_matches_domain_defaults() {
        let config = FileCouncilConfig::default();
        let roster = config.roster();
        assert_eq!(roster.members, Model::default_council());
        assert_eq!(roster.synthesizer, Model::default_synthesizer());
        assert_eq!(roster.title_model, Model::default_title_model());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [council]
            members = ["openai/gpt-5.1", "meta/llama-5-behemoth"]
            "#,
        )
        .unwrap();

        let roster = config.council.roster();
        assert_eq!(roster.members.len(), 2);
        assert_eq!(
            roster.members[1],
            Model::Custom("meta/llama-5-behemoth".to_string())
        );
        // Untouched sections stay at their defaults
        assert_eq!(roster.synthesizer, Model::default_synthesizer());
        assert!(config.openrouter.base_url.contains("openrouter.ai"));
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = FileStorageConfig {
            data_dir: Some(PathBuf::from("/tmp/council-data")),
        };
        assert_eq!(
            config.resolved_data_dir(),
            PathBuf::from("/tmp/council-data")
        );
    }
}
