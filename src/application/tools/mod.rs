//! Tool registry for the function-calling analyzer
//!
//! Exposes the agents as OpenAI function tools and dispatches tool calls
//! back to them.

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::application::agents::{ImageDescriber, InternetSearch, VideoDescriber, WebContent};
use crate::application::errors::AppError;
use crate::infrastructure::llm::ToolDefinition;

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
}

#[derive(Deserialize)]
struct ImageArgs {
    image_url: String,
}

#[derive(Deserialize)]
struct VideoArgs {
    frame_url: String,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Deserialize)]
struct WebArgs {
    url: String,
}

/// All tools available to the analyzer
pub struct ToolRegistry {
    search: Arc<InternetSearch>,
    image: Arc<ImageDescriber>,
    video: Arc<VideoDescriber>,
    web: Arc<WebContent>,
}

impl ToolRegistry {
    pub fn new(
        search: Arc<InternetSearch>,
        image: Arc<ImageDescriber>,
        video: Arc<VideoDescriber>,
        web: Arc<WebContent>,
    ) -> Self {
        Self {
            search,
            image,
            video,
            web,
        }
    }

    /// OpenAI-compatible definitions for all registered tools
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::function(
                "search_internet",
                "Search the internet for information",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            ToolDefinition::function(
                "analyze_image",
                "Analyze an image from a given URL",
                json!({
                    "type": "object",
                    "properties": {
                        "image_url": {
                            "type": "string",
                            "description": "URL of the image to analyze"
                        }
                    },
                    "required": ["image_url"]
                }),
            ),
            ToolDefinition::function(
                "analyze_video",
                "Analyze a video through its thumbnail or key frame",
                json!({
                    "type": "object",
                    "properties": {
                        "frame_url": {
                            "type": "string",
                            "description": "URL of the video's thumbnail or key frame"
                        },
                        "duration": {
                            "type": "number",
                            "description": "Video duration in seconds, if known"
                        }
                    },
                    "required": ["frame_url"]
                }),
            ),
            ToolDefinition::function(
                "summarize_webpage",
                "Generate a summary of a webpage's content",
                json!({
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "URL of the webpage to summarize"
                        }
                    },
                    "required": ["url"]
                }),
            ),
        ]
    }

    /// (name, description) pairs for prompt building
    pub fn descriptions(&self) -> Vec<(String, String)> {
        self.definitions()
            .into_iter()
            .map(|d| (d.function.name, d.function.description))
            .collect()
    }

    /// Execute a tool by name with JSON-encoded arguments
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<String, AppError> {
        tracing::info!("Executing tool: {}", name);

        match name {
            "search_internet" => {
                let args: SearchArgs = parse_args(name, arguments)?;
                self.search.search(&args.query).await
            }
            "analyze_image" => {
                let args: ImageArgs = parse_args(name, arguments)?;
                self.image.describe(&args.image_url).await
            }
            "analyze_video" => {
                let args: VideoArgs = parse_args(name, arguments)?;
                self.video.describe_frame(&args.frame_url, args.duration).await
            }
            "summarize_webpage" => {
                let args: WebArgs = parse_args(name, arguments)?;
                self.web.summarize_url(&args.url).await
            }
            other => Err(AppError::Tool(format!("Unknown tool: {}", other))),
        }
    }
}

fn parse_args<'a, T: Deserialize<'a>>(name: &str, arguments: &'a str) -> Result<T, AppError> {
    serde_json::from_str(arguments)
        .map_err(|e| AppError::Tool(format!("Bad arguments for {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::agents::testing::ScriptedLLM;
    use crate::infrastructure::llm::LLMConfig;
    use crate::infrastructure::webcrawler::WebCrawler;

    fn registry_with(llm: Arc<ScriptedLLM>) -> ToolRegistry {
        let config = LLMConfig::default();
        let crawler = Arc::new(WebCrawler::new(100, 30).unwrap());
        ToolRegistry::new(
            Arc::new(InternetSearch::new(llm.clone(), &config)),
            Arc::new(ImageDescriber::new(llm.clone(), &config)),
            Arc::new(VideoDescriber::new(llm.clone(), &config)),
            Arc::new(WebContent::new(llm, crawler, &config)),
        )
    }

    #[test]
    fn test_definitions_cover_all_tools() {
        let registry = registry_with(Arc::new(ScriptedLLM::new(vec![])));
        let names: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|d| d.function.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "search_internet",
                "analyze_image",
                "analyze_video",
                "summarize_webpage"
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_dispatches_search() {
        let llm = Arc::new(ScriptedLLM::new(vec!["findings"]));
        let registry = registry_with(llm);

        let result = registry
            .execute("search_internet", r#"{"query": "rust"}"#)
            .await
            .unwrap();
        assert_eq!(result, "findings");
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = registry_with(Arc::new(ScriptedLLM::new(vec![])));
        let result = registry.execute("launch_rockets", "{}").await;
        assert!(matches!(result, Err(AppError::Tool(_))));
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_arguments() {
        let registry = registry_with(Arc::new(ScriptedLLM::new(vec![])));
        let result = registry.execute("search_internet", "not json").await;
        assert!(matches!(result, Err(AppError::Tool(_))));
    }
}
