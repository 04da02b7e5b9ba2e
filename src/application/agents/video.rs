//! Video description agent
//!
//! Videos are described through their key frame (the FxTwitter thumbnail);
//! nothing here decodes video streams.

use std::sync::Arc;

use crate::application::errors::AppError;
use crate::domain::entities::tweet::Media;
use crate::infrastructure::llm::{ContentPart, LLMConfig, LLMMessage, ModelRole, LLM};
use crate::infrastructure::media::MediaLoader;

const SYSTEM_PROMPT: &str = "You are a media processing assistant. Analyze the provided video \
    frame and describe the content, noting any motion or action the frame implies.";

const MAX_TOKENS: u32 = 300;

/// Describes a video via its key frame
pub struct VideoDescriber {
    llm: Arc<dyn LLM>,
    loader: MediaLoader,
    model: String,
}

impl VideoDescriber {
    pub fn new(llm: Arc<dyn LLM>, config: &LLMConfig) -> Self {
        Self {
            llm,
            loader: MediaLoader::new(),
            model: config.model(ModelRole::Vision).to_string(),
        }
    }

    /// Describe a video attachment through its thumbnail frame
    pub async fn describe(&self, media: &Media) -> Result<String, AppError> {
        let frame_url = media.thumbnail_url.as_deref().ok_or_else(|| {
            AppError::Media(format!("Video has no thumbnail frame: {}", media.url))
        })?;

        self.describe_frame(frame_url, media.duration).await
    }

    /// Describe a video from one key frame URL
    pub async fn describe_frame(
        &self,
        frame_url: &str,
        duration: Option<f64>,
    ) -> Result<String, AppError> {
        tracing::info!("Describing video frame: {}", frame_url);

        let data_url = self.loader.fetch_data_url(frame_url).await?;
        self.describe_frame_data_url(&data_url, duration).await
    }

    /// Describe a video from an already-encoded key frame
    pub async fn describe_frame_data_url(
        &self,
        data_url: &str,
        duration: Option<f64>,
    ) -> Result<String, AppError> {
        let intro = match duration {
            Some(secs) => format!(
                "Analyze the following key frame from a {:.0}-second video:",
                secs
            ),
            None => "Analyze the following key frame from a video:".to_string(),
        };

        let messages = vec![
            LLMMessage::system(SYSTEM_PROMPT),
            LLMMessage::user_parts(vec![
                ContentPart::text(intro),
                ContentPart::image_url(data_url),
            ]),
        ];

        let response = self
            .llm
            .chat(messages, Some(self.model.as_str()), None, Some(MAX_TOKENS))
            .await?;

        tracing::debug!("Video frame described: {:.100}", response.content);
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::agents::testing::ScriptedLLM;
    use crate::domain::entities::tweet::MediaKind;

    #[tokio::test]
    async fn test_duration_appears_in_prompt() {
        let llm = Arc::new(ScriptedLLM::new(vec!["A racing clip"]));
        let describer = VideoDescriber::new(llm.clone(), &LLMConfig::default());

        let description = describer
            .describe_frame_data_url("data:image/jpeg;base64,AAAA", Some(12.0))
            .await
            .unwrap();
        assert_eq!(description, "A racing clip");

        let requests = llm.requests.lock().unwrap();
        let user_text = requests[0][1].content.as_text();
        assert!(user_text.contains("12-second video"), "got: {}", user_text);
    }

    #[tokio::test]
    async fn test_video_without_thumbnail_is_an_error() {
        let llm = Arc::new(ScriptedLLM::new(vec![]));
        let describer = VideoDescriber::new(llm, &LLMConfig::default());

        let media = Media {
            kind: MediaKind::Video,
            url: "https://video.twimg.com/clip.mp4".to_string(),
            thumbnail_url: None,
            duration: None,
        };

        let result = describer.describe(&media).await;
        assert!(matches!(result, Err(AppError::Media(_))));
    }
}
