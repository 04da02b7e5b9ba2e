//! Reply generation agent

use std::sync::Arc;

use crate::application::errors::AppError;
use crate::infrastructure::config::ReplyConfig;
use crate::infrastructure::llm::{LLMConfig, LLMMessage, ModelRole, LLM};

const SYSTEM_PROMPT: &str = "You are an expert at generating contextually appropriate replies \
    to tweets. Generate engaging and relevant responses while maintaining the specified \
    personality and adhering to given criteria.";

/// Generates candidate replies for an analyzed tweet
pub struct ReplyGenerator {
    llm: Arc<dyn LLM>,
    model: String,
    temperature: f32,
    criteria: String,
    number_of_replies: u32,
}

impl ReplyGenerator {
    pub fn new(llm: Arc<dyn LLM>, llm_config: &LLMConfig, reply_config: &ReplyConfig) -> Self {
        Self {
            llm,
            model: llm_config.model(ModelRole::Chat).to_string(),
            temperature: llm_config.temperature,
            criteria: reply_config.criteria.clone(),
            number_of_replies: reply_config.number_of_replies,
        }
    }

    /// Generate the configured number of candidate replies
    pub async fn generate(
        &self,
        tweet_text: &str,
        analysis: &str,
    ) -> Result<Vec<String>, AppError> {
        tracing::info!("Generating replies for tweet: {:.50}...", tweet_text);

        let prompt = self.build_prompt(tweet_text, analysis);
        let messages = vec![LLMMessage::system(SYSTEM_PROMPT), LLMMessage::user(prompt)];

        let replies = self
            .llm
            .chat_n(
                messages,
                self.number_of_replies,
                Some(self.model.as_str()),
                Some(self.temperature),
                None,
            )
            .await?;

        tracing::info!("Generated {} replies", replies.len());
        Ok(replies)
    }

    /// Criteria-aware prompt combining the tweet and its analysis
    fn build_prompt(&self, tweet_text: &str, analysis: &str) -> String {
        format!(
            "# Generate a reply to the following tweet:\n\"{}\"\n\n\
             # Tweet Analysis:\n{}\n\n\
             # Requirements:\n{}",
            tweet_text, analysis, self.criteria
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::agents::testing::ScriptedLLM;

    fn generator(llm: Arc<ScriptedLLM>, n: u32) -> ReplyGenerator {
        let reply_config = ReplyConfig {
            criteria: "Be witty. No hashtags.".to_string(),
            number_of_replies: n,
        };
        ReplyGenerator::new(llm, &LLMConfig::default(), &reply_config)
    }

    #[tokio::test]
    async fn test_generates_configured_number_of_replies() {
        let llm = Arc::new(ScriptedLLM::new(vec!["one", "two", "three"]));
        let generator = generator(llm.clone(), 3);

        let replies = generator.generate("Rust is great", "Positive").await.unwrap();
        assert_eq!(replies, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_prompt_includes_tweet_analysis_and_criteria() {
        let llm = Arc::new(ScriptedLLM::new(vec!["ok"]));
        let generator = generator(llm.clone(), 1);

        generator.generate("Shipping v1.0", "Excited tone").await.unwrap();

        let requests = llm.requests.lock().unwrap();
        let prompt = requests[0][1].content.as_text();
        assert!(prompt.contains("\"Shipping v1.0\""));
        assert!(prompt.contains("# Tweet Analysis:\nExcited tone"));
        assert!(prompt.contains("Be witty. No hashtags."));
    }
}
