//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::infrastructure::llm::LLMConfig;

/// Tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub reply: ReplyConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PipelineConfig {
    /// Run a web research pass before analysis
    pub search_enabled: bool,
    /// Let the analyzer call tools (search, image, video, webpage)
    pub use_tools: bool,
    /// Where Markdown reports are written
    pub output_folder: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReplyConfig {
    /// Free-text style and content requirements for generated replies
    pub criteria: String,
    pub number_of_replies: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            reply: ReplyConfig::default(),
            llm: LLMConfig::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_enabled: false,
            use_tools: true,
            output_folder: PathBuf::from("output"),
        }
    }
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            criteria: "Keep replies under 280 characters, conversational, \
                       relevant to the tweet, and free of hashtags."
                .to_string(),
            number_of_replies: 3,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.llm.load_env();

        Ok(config)
    }

    /// Defaults plus environment-provided API keys
    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.llm.load_env();
        config
    }

    /// Validate settings that would only fail mid-pipeline otherwise
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply.number_of_replies == 0 {
            return Err(ConfigError::InvalidValue(
                "number-of-replies must be at least 1".to_string(),
            ));
        }
        if self.llm.openai_api_key.is_none() {
            return Err(ConfigError::MissingField("OPENAI_API_KEY".to_string()));
        }
        if self.pipeline.search_enabled && self.llm.perplexity_api_key.is_none() {
            return Err(ConfigError::MissingField("PERPLEXITY_API_KEY".to_string()));
        }
        Ok(())
    }

    /// Serialize the defaults as a starter config file
    pub fn default_yaml() -> String {
        serde_yaml::to_string(&Config::default())
            .unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.pipeline.search_enabled);
        assert!(config.pipeline.use_tools);
        assert_eq!(config.reply.number_of_replies, 3);
        assert_eq!(config.llm.chat_model, "gpt-4o");
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = r#"
pipeline:
  search-enabled: true
reply:
  number-of-replies: 5
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.pipeline.search_enabled);
        assert_eq!(config.reply.number_of_replies, 5);
        // Untouched sections keep their defaults
        assert!(config.pipeline.use_tools);
        assert_eq!(config.llm.search_model, "sonar");
    }

    #[test]
    fn test_validate_rejects_zero_replies() {
        let mut config = Config::default();
        config.llm.openai_api_key = Some("sk-test".to_string());
        config.reply.number_of_replies = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_yaml_round_trips() {
        let yaml = Config::default_yaml();
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.reply.number_of_replies, 3);
    }
}
