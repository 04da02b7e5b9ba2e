//! Pipeline service - the end-to-end tweet-to-replies flow

use std::sync::Arc;

use crate::application::agents::{
    ImageDescriber, InternetSearch, ReplyGenerator, TweetAnalyzer, VideoDescriber, WebContent,
};
use crate::application::errors::{AppError, ConfigError};
use crate::application::tools::ToolRegistry;
use crate::domain::entities::tweet::MediaKind;
use crate::domain::entities::{Tweet, TweetContext};
use crate::infrastructure::config::Config;
use crate::infrastructure::llm::{LLMProvider, ModelRole, OpenAIProvider, PerplexityProvider, LLM};
use crate::infrastructure::twitter::TweetFetcher;
use crate::infrastructure::webcrawler::WebCrawler;

/// Crawler defaults: one request per second, thirty per domain per minute
const CRAWL_MIN_INTERVAL_MS: u64 = 1000;
const CRAWL_MAX_PER_MINUTE: u32 = 30;

/// Result of one pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    pub tweet: Tweet,
    pub context: TweetContext,
    pub analysis: String,
    pub replies: Vec<String>,
}

/// Sequential orchestration of fetch, enrichment, analysis and reply drafting
pub struct Pipeline {
    config: Config,
    fetcher: TweetFetcher,
    image: Arc<ImageDescriber>,
    video: Arc<VideoDescriber>,
    web: Arc<WebContent>,
    search: Option<Arc<InternetSearch>>,
    analyzer: TweetAnalyzer,
    reply: ReplyGenerator,
    tools: Option<ToolRegistry>,
}

impl Pipeline {
    /// Wire up providers and agents from the configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        config.validate()?;

        let openai_key = config
            .llm
            .api_key(LLMProvider::OpenAI)
            .ok_or_else(|| ConfigError::MissingField("OPENAI_API_KEY".to_string()))?
            .to_string();
        let mut provider = OpenAIProvider::new(openai_key, Some(config.llm.chat_model.as_str()));
        if let Some(base_url) = &config.llm.openai_base_url {
            provider = provider.with_base_url(base_url);
        }
        let openai: Arc<dyn LLM> = Arc::new(provider);

        let search = config
            .llm
            .api_key(LLMProvider::Perplexity)
            .map(|key| {
                let perplexity: Arc<dyn LLM> =
                    Arc::new(PerplexityProvider::new(key, Some(config.llm.search_model.as_str())));
                Arc::new(InternetSearch::new(perplexity, &config.llm))
            });

        Self::with_llm(config, openai, search)
    }

    /// Wire up agents over an already-built provider
    pub fn with_llm(
        config: Config,
        llm: Arc<dyn LLM>,
        search: Option<Arc<InternetSearch>>,
    ) -> Result<Self, AppError> {
        let crawler = Arc::new(WebCrawler::new(CRAWL_MIN_INTERVAL_MS, CRAWL_MAX_PER_MINUTE)?);

        let image = Arc::new(ImageDescriber::new(llm.clone(), &config.llm));
        let video = Arc::new(VideoDescriber::new(llm.clone(), &config.llm));
        let web = Arc::new(WebContent::new(llm.clone(), crawler, &config.llm));

        let tools = if config.pipeline.use_tools {
            let registry_search = search.clone().unwrap_or_else(|| {
                // Without an online-search provider the tool answers from the
                // chat model instead of a search model
                Arc::new(InternetSearch::with_role(
                    llm.clone(),
                    &config.llm,
                    ModelRole::Chat,
                ))
            });
            Some(ToolRegistry::new(
                registry_search,
                image.clone(),
                video.clone(),
                web.clone(),
            ))
        } else {
            None
        };

        let analyzer = TweetAnalyzer::new(llm.clone(), &config.llm);
        let reply = ReplyGenerator::new(llm, &config.llm, &config.reply);

        Ok(Self {
            config,
            fetcher: TweetFetcher::new(),
            image,
            video,
            web,
            search,
            analyzer,
            reply,
            tools,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline for one tweet URL
    pub async fn run(&self, url: &str) -> Result<PipelineOutput, AppError> {
        let tweet = self.fetcher.fetch(url).await?;
        self.run_with_tweet(tweet).await
    }

    /// Enrich, analyze and draft replies for an already-fetched tweet
    pub async fn run_with_tweet(&self, tweet: Tweet) -> Result<PipelineOutput, AppError> {
        let mut context = TweetContext::new(tweet.clone());
        context.media_descriptions = self.describe_media(&tweet).await;
        context.link_summaries = self.summarize_links(&tweet).await;
        context.search_findings = self.research(&tweet).await;

        let rendered = context.render();
        let analysis = match &self.tools {
            Some(registry) => self.analyzer.analyze_with_tools(&rendered, registry).await?,
            None => self.analyzer.analyze(&rendered).await?,
        };
        tracing::info!("Tweet analysis: {:.200}", analysis);

        let replies = self.reply.generate(&tweet.text, &analysis).await?;

        Ok(PipelineOutput {
            tweet,
            context,
            analysis,
            replies,
        })
    }

    /// Describe each media attachment; failures degrade to an error note
    async fn describe_media(&self, tweet: &Tweet) -> Vec<String> {
        let items = tweet.media_items();
        if items.is_empty() {
            tracing::info!("No media found in tweet");
            return Vec::new();
        }

        let mut descriptions = Vec::with_capacity(items.len());
        for media in items {
            let result = match media.kind {
                MediaKind::Photo => self.image.describe(&media.url).await,
                MediaKind::Video | MediaKind::Gif => self.video.describe(media).await,
            };
            descriptions.push(result.unwrap_or_else(|e| {
                tracing::warn!("Media description failed for {}: {}", media.url, e);
                format!("(media could not be described: {})", e)
            }));
        }
        descriptions
    }

    /// Summarize external links found in the tweet text
    async fn summarize_links(&self, tweet: &Tweet) -> Vec<(String, String)> {
        let mut summaries = Vec::new();
        for url in tweet.external_urls() {
            match self.web.summarize_url(&url).await {
                Ok(summary) => summaries.push((url, summary)),
                Err(e) => tracing::warn!("Link summary failed for {}: {}", url, e),
            }
        }
        summaries
    }

    /// Optional research pass over the tweet text
    async fn research(&self, tweet: &Tweet) -> Option<String> {
        if !self.config.pipeline.search_enabled {
            return None;
        }
        let search = self.search.as_ref()?;

        let query = format!(
            "Background and recent news relevant to this tweet by @{}: {}",
            tweet.author.screen_name, tweet.text
        );
        match search.search(&query).await {
            Ok(findings) => Some(findings),
            Err(e) => {
                tracing::warn!("Web research failed: {}", e);
                None
            }
        }
    }
}
