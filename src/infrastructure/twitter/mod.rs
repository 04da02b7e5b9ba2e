//! Tweet fetching via the FxTwitter API

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Deserialize;
use std::time::Duration;

use crate::application::errors::FetchError;
use crate::domain::entities::Tweet;

/// FxTwitter API endpoint
const FXTWITTER_BASE: &str = "https://api.fxtwitter.com";

/// Matches twitter.com/x.com status URLs, capturing screen name and tweet id
static TWEET_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:twitter\.com|x\.com)/(\w+)/status/(\d+)").unwrap());

/// FxTwitter response envelope
#[derive(Deserialize)]
struct FxResponse {
    tweet: Option<Tweet>,
}

/// Fetches tweet metadata from Twitter/X post URLs
pub struct TweetFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl TweetFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("reply-guy/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: FXTWITTER_BASE.to_string(),
        }
    }

    /// Point the fetcher at a different FxTwitter-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate that the URL is a Twitter/X post URL
    pub fn is_valid_tweet_url(url: &str) -> bool {
        url.contains("/status/") && TWEET_URL_RE.is_match(url)
    }

    /// Extract (screen_name, tweet_id) from a Twitter or X.com URL
    pub fn extract_tweet_info(url: &str) -> Option<(String, String)> {
        let caps = TWEET_URL_RE.captures(url)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }

    /// Fetch tweet data for a given tweet URL
    pub async fn fetch(&self, url: &str) -> Result<Tweet, FetchError> {
        tracing::info!("Fetching tweet data for URL: {}", url);

        if !Self::is_valid_tweet_url(url) {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let (screen_name, tweet_id) = Self::extract_tweet_info(url)
            .ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;
        tracing::debug!("Extracted author: {}, tweet id: {}", screen_name, tweet_id);

        let api_url = format!("{}/status/{}", self.base_url, tweet_id);
        let response = self
            .client
            .get(&api_url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!("FxTwitter response status: {}", status);

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: FxResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        let tweet = envelope.tweet.ok_or(FetchError::NotFound)?;
        tracing::info!(
            "Fetched tweet by @{} ({} media items)",
            tweet.author.screen_name,
            tweet.media_items().len()
        );

        Ok(tweet)
    }
}

impl Default for TweetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_tweet_url() {
        assert!(TweetFetcher::is_valid_tweet_url(
            "https://x.com/GroqInc/status/1851251889309986932"
        ));
        assert!(TweetFetcher::is_valid_tweet_url(
            "https://twitter.com/rustlang/status/123456789"
        ));
        assert!(!TweetFetcher::is_valid_tweet_url("https://x.com/rustlang"));
        assert!(!TweetFetcher::is_valid_tweet_url(
            "https://example.com/foo/status/123"
        ));
    }

    #[test]
    fn test_extract_tweet_info() {
        let (author, id) =
            TweetFetcher::extract_tweet_info("https://x.com/GroqInc/status/1851251889309986932")
                .unwrap();
        assert_eq!(author, "GroqInc");
        assert_eq!(id, "1851251889309986932");

        assert!(TweetFetcher::extract_tweet_info("https://x.com/GroqInc").is_none());
    }

    #[test]
    fn test_envelope_without_tweet_is_none() {
        let envelope: FxResponse = serde_json::from_str(r#"{"code": 404}"#).unwrap();
        assert!(envelope.tweet.is_none());
    }
}
