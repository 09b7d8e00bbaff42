//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./council.toml` or `./.council.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/llm-council/config.toml`
    /// 4. Fallback: `~/.config/llm-council/config.toml`
    /// 5. Default values
    ///
    /// The OpenRouter API key additionally falls back to the
    /// `OPENROUTER_API_KEY` environment variable when no file sets it.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["council.toml", ".council.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        let mut config: FileConfig = figment.extract().map_err(Box::new)?;
        if config.openrouter.api_key.is_none()
            && let Ok(key) = std::env::var("OPENROUTER_API_KEY")
            && !key.is_empty()
        {
            config.openrouter.api_key = Some(key);
        }
        Ok(config)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        let mut config = FileConfig::default();
        if let Ok(key) = std::env::var("OPENROUTER_API_KEY")
            && !key.is_empty()
        {
            config.openrouter.api_key = Some(key);
        }
        config
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/llm-council/config.toml if set,
    /// otherwise falls back to ~/.config/llm-council/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("llm-council").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["council.toml", ".council.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Model;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.council.roster().members, Model::default_council());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("llm-council"));
    }

    #[test]
    fn test_explicit_path_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[council]\nsynthesizer = \"anthropic/claude-opus-4.5\""
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(
            config.council.roster().synthesizer,
            Model::ClaudeOpus45
        );
        // Sections the file does not mention keep their defaults
        assert_eq!(config.council.roster().members, Model::default_council());
    }
}
