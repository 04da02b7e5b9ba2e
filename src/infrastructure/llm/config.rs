//! LLM Configuration

use serde::{Deserialize, Serialize};

/// LLM Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    OpenAI,
    Perplexity,
}

/// What a model is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    /// Analysis, summarization and reply generation
    Chat,
    /// Image and video-frame description
    Vision,
    /// Online web research
    Search,
}

/// LLM Configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LLMConfig {
    /// Model used for analysis and reply generation
    pub chat_model: String,
    /// Model used for image and video-frame description
    pub vision_model: String,
    /// Perplexity model used for web research
    pub search_model: String,

    /// Default sampling temperature
    pub temperature: f32,
    /// Default completion limit
    pub max_tokens: Option<u32>,

    // API keys and endpoint overrides come from the environment, never the file
    #[serde(skip)]
    pub openai_api_key: Option<String>,
    #[serde(skip)]
    pub perplexity_api_key: Option<String>,
    #[serde(skip)]
    pub openai_base_url: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            chat_model: "gpt-4o".to_string(),
            vision_model: "gpt-4o".to_string(),
            search_model: "sonar".to_string(),
            temperature: 0.7,
            max_tokens: Some(1024),
            openai_api_key: None,
            perplexity_api_key: None,
            openai_base_url: None,
        }
    }
}

impl LLMConfig {
    /// Fill keys and endpoint overrides from environment variables
    pub fn load_env(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("PERPLEXITY_API_KEY") {
            self.perplexity_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            self.openai_base_url = Some(url);
        }
    }

    /// Config with env keys already applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.load_env();
        config
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider: LLMProvider) -> Option<&str> {
        match provider {
            LLMProvider::OpenAI => self.openai_api_key.as_deref(),
            LLMProvider::Perplexity => self.perplexity_api_key.as_deref(),
        }
    }

    /// Get the configured model for a role
    pub fn model(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Chat => &self.chat_model,
            ModelRole::Vision => &self.vision_model,
            ModelRole::Search => &self.search_model,
        }
    }
}
