//! Tweet entities - transient shapes of the FxTwitter payload

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Bare http(s) links in tweet text
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+").unwrap());

/// A fetched tweet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    pub author: TweetAuthor,
    #[serde(default)]
    pub media: Option<TweetMedia>,
    /// Quoted tweet, if this is a quote tweet
    #[serde(default)]
    pub quote: Option<Box<Tweet>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub retweets: Option<u64>,
    #[serde(default)]
    pub replies: Option<u64>,
}

impl Tweet {
    /// All media items, in tweet order
    pub fn media_items(&self) -> &[Media] {
        self.media.as_ref().map(|m| m.all.as_slice()).unwrap_or(&[])
    }

    /// External links in the tweet text, excluding links back to Twitter/X
    pub fn external_urls(&self) -> Vec<String> {
        LINK_RE
            .find_iter(&self.text)
            .map(|m| m.as_str().trim_end_matches(&[')', '.', ','][..]).to_string())
            .filter(|url| !url.contains("twitter.com/") && !url.contains("x.com/"))
            .collect()
    }
}

/// Tweet author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetAuthor {
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
}

/// Media attachments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetMedia {
    #[serde(default)]
    pub all: Vec<Media>,
}

/// One media attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    /// Key frame for videos and gifs
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Video duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Kind of media attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Gif,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweet_with_text(text: &str) -> Tweet {
        Tweet {
            id: None,
            text: text.to_string(),
            author: TweetAuthor {
                name: "Test User".to_string(),
                screen_name: "testuser".to_string(),
                avatar_url: None,
                banner_url: None,
            },
            media: None,
            quote: None,
            created_at: None,
            likes: None,
            retweets: None,
            replies: None,
        }
    }

    #[test]
    fn test_external_urls_skips_twitter_links() {
        let tweet = tweet_with_text(
            "Read this https://example.com/post and https://x.com/foo/status/1",
        );
        assert_eq!(tweet.external_urls(), vec!["https://example.com/post"]);
    }

    #[test]
    fn test_external_urls_strips_trailing_punctuation() {
        let tweet = tweet_with_text("See https://example.com/a.");
        assert_eq!(tweet.external_urls(), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_deserialize_fxtwitter_shape() {
        let json = r#"{
            "id": "1851251889309986932",
            "text": "Fast inference is here https://example.com/blog",
            "author": {
                "name": "Groq Inc",
                "screen_name": "GroqInc",
                "avatar_url": "https://pbs.twimg.com/profile_images/x.jpg"
            },
            "media": {
                "all": [
                    {"type": "photo", "url": "https://pbs.twimg.com/media/a.jpg"},
                    {
                        "type": "video",
                        "url": "https://video.twimg.com/b.mp4",
                        "thumbnail_url": "https://pbs.twimg.com/media/b.jpg",
                        "duration": 12.5
                    }
                ]
            },
            "likes": 42,
            "retweets": 7
        }"#;

        let tweet: Tweet = serde_json::from_str(json).unwrap();
        assert_eq!(tweet.author.screen_name, "GroqInc");
        assert_eq!(tweet.media_items().len(), 2);
        assert_eq!(tweet.media_items()[0].kind, MediaKind::Photo);
        assert_eq!(tweet.media_items()[1].kind, MediaKind::Video);
        assert_eq!(tweet.media_items()[1].duration, Some(12.5));
        assert_eq!(tweet.likes, Some(42));
        assert!(tweet.quote.is_none());
    }
}
