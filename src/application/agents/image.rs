//! Image description agent

use std::sync::Arc;

use crate::application::errors::AppError;
use crate::infrastructure::llm::{ContentPart, LLMConfig, LLMMessage, ModelRole, LLM};
use crate::infrastructure::media::MediaLoader;

const SYSTEM_PROMPT: &str = "You are an image analysis assistant. Analyze the provided image and \
    describe its content in detail, noting important features, objects, and any text present.";

/// Completion budget for one description
const MAX_TOKENS: u32 = 300;

/// Describes a single image with a vision model
pub struct ImageDescriber {
    llm: Arc<dyn LLM>,
    loader: MediaLoader,
    model: String,
}

impl ImageDescriber {
    pub fn new(llm: Arc<dyn LLM>, config: &LLMConfig) -> Self {
        Self {
            llm,
            loader: MediaLoader::new(),
            model: config.model(ModelRole::Vision).to_string(),
        }
    }

    /// Download the image and produce a text description
    pub async fn describe(&self, image_url: &str) -> Result<String, AppError> {
        tracing::info!("Describing image: {}", image_url);

        let data_url = self.loader.fetch_data_url(image_url).await?;
        self.describe_data_url(&data_url).await
    }

    /// Describe an already-encoded image
    pub async fn describe_data_url(&self, data_url: &str) -> Result<String, AppError> {
        let messages = vec![
            LLMMessage::system(SYSTEM_PROMPT),
            LLMMessage::user_parts(vec![
                ContentPart::text("Analyze the following image:"),
                ContentPart::image_url(data_url),
            ]),
        ];

        let response = self
            .llm
            .chat(messages, Some(self.model.as_str()), None, Some(MAX_TOKENS))
            .await?;

        tracing::debug!("Image described: {:.100}", response.content);
        Ok(response.content)
    }
}
