//! Web content agent - crawl a link and summarize it

use std::sync::Arc;

use crate::application::errors::AppError;
use crate::infrastructure::llm::{LLMConfig, LLMMessage, ModelRole, LLM};
use crate::infrastructure::webcrawler::WebCrawler;

const SYSTEM_PROMPT: &str = "You are a web content analysis assistant. Process web pages and \
    provide clear, concise summaries of their content while preserving key information.";

const MAX_TOKENS: u32 = 1000;

/// Raw-content cap when summarization is unavailable
const FALLBACK_MAX_LEN: usize = 20_000;

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp"];

/// Fetches a page and summarizes its text content
pub struct WebContent {
    llm: Arc<dyn LLM>,
    crawler: Arc<WebCrawler>,
    model: String,
    temperature: f32,
}

impl WebContent {
    pub fn new(llm: Arc<dyn LLM>, crawler: Arc<WebCrawler>, config: &LLMConfig) -> Self {
        Self {
            llm,
            crawler,
            model: config.model(ModelRole::Chat).to_string(),
            temperature: config.temperature,
        }
    }

    /// Crawl the URL and return a summary of its content
    pub async fn summarize_url(&self, url: &str) -> Result<String, AppError> {
        tracing::info!("Summarizing URL: {}", url);

        if is_image_url(url) {
            return Err(AppError::Crawl(format!("URL points at an image: {}", url)));
        }

        let content = self.crawler.fetch(url).await?;
        if content.is_empty() {
            return Err(AppError::Crawl(format!("No content extracted from {}", url)));
        }

        Ok(self.summarize_content(&content).await)
    }

    /// Summarize extracted page text; falls back to truncation if the model fails
    pub async fn summarize_content(&self, content: &str) -> String {
        let messages = vec![
            LLMMessage::system(SYSTEM_PROMPT),
            LLMMessage::user(format!(
                "Please provide a comprehensive summary of the following web content:\n\n{}",
                content
            )),
        ];

        match self
            .llm
            .chat(
                messages,
                Some(self.model.as_str()),
                Some(self.temperature),
                Some(MAX_TOKENS),
            )
            .await
        {
            Ok(response) => response.content,
            Err(e) => {
                tracing::warn!("Summarization failed ({}), returning truncated content", e);
                truncate(content, FALLBACK_MAX_LEN)
            }
        }
    }
}

fn is_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    let path = lower.split(&['?', '#'][..]).next().unwrap_or(&lower);
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn truncate(content: &str, max_len: usize) -> String {
    if content.len() > max_len {
        let mut end = max_len;
        while !content.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &content[..end])
    } else {
        content.to_string()
    }
}
