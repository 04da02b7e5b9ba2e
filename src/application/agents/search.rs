//! Internet search agent (Perplexity online models)

use std::sync::Arc;

use crate::application::errors::AppError;
use crate::infrastructure::llm::{LLMConfig, LLMMessage, ModelRole, LLM};

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that searches the internet for information.";

/// Web research through an online-search model
pub struct InternetSearch {
    llm: Arc<dyn LLM>,
    model: String,
    temperature: f32,
}

impl InternetSearch {
    pub fn new(llm: Arc<dyn LLM>, config: &LLMConfig) -> Self {
        Self::with_role(llm, config, ModelRole::Search)
    }

    /// Build against a different model role, for providers without an
    /// online-search model
    pub fn with_role(llm: Arc<dyn LLM>, config: &LLMConfig, role: ModelRole) -> Self {
        Self {
            llm,
            model: config.model(role).to_string(),
            temperature: config.temperature,
        }
    }

    /// Run one search query and return the model's findings
    pub async fn search(&self, query: &str) -> Result<String, AppError> {
        tracing::info!("Searching the internet for: {:.80}", query);

        let messages = vec![
            LLMMessage::system(SYSTEM_PROMPT),
            LLMMessage::user(format!("Search the internet for: {}", query)),
        ];

        let response = self
            .llm
            .chat(messages, Some(self.model.as_str()), Some(self.temperature), None)
            .await?;

        tracing::debug!("Search completed: {:.100}", response.content);
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::agents::testing::ScriptedLLM;

    #[tokio::test]
    async fn test_search_wraps_query() {
        let llm = Arc::new(ScriptedLLM::new(vec!["Rust 1.80 released in July"]));
        let search = InternetSearch::new(llm.clone(), &LLMConfig::default());

        let findings = search.search("latest Rust release").await.unwrap();
        assert_eq!(findings, "Rust 1.80 released in July");

        let requests = llm.requests.lock().unwrap();
        assert_eq!(
            requests[0][1].content.as_text(),
            "Search the internet for: latest Rust release"
        );
        // The default construction asks for the search model
        let models = llm.models.lock().unwrap();
        assert_eq!(models[0].as_deref(), Some("sonar"));
    }

    #[tokio::test]
    async fn test_chat_role_requests_chat_model() {
        let llm = Arc::new(ScriptedLLM::new(vec!["findings"]));
        let config = LLMConfig::default();
        let search = InternetSearch::with_role(llm.clone(), &config, ModelRole::Chat);

        search.search("anything").await.unwrap();

        let models = llm.models.lock().unwrap();
        assert_eq!(models[0].as_deref(), Some(config.chat_model.as_str()));
    }
}
