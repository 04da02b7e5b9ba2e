//! Web Crawler Module
//!
//! Page fetching with per-domain rate limiting and HTML-to-text extraction

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::application::errors::AppError;

/// Rate limiter for domains
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<Instant>>>,
    min_interval: Duration,
    max_per_minute: u32,
}

impl RateLimiter {
    pub fn new(min_interval_ms: u64, max_per_minute: u32) -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
            min_interval: Duration::from_millis(min_interval_ms),
            max_per_minute,
        }
    }

    /// Time to wait before the next request to this domain, or None if clear.
    /// When None is returned the request has been recorded.
    fn check(&self, domain: &str) -> Option<Duration> {
        let mut requests = self.requests.lock().unwrap();
        let now = Instant::now();

        // Drop requests older than the one-minute window
        let one_minute_ago = now - Duration::from_secs(60);
        if let Some(insts) = requests.get_mut(domain) {
            insts.retain(|i| *i > one_minute_ago);
        }

        let entry = requests.entry(domain.to_string()).or_default();

        if let Some(last) = entry.last() {
            let since_last = now.duration_since(*last);
            if since_last < self.min_interval {
                return Some(self.min_interval - since_last);
            }
        }

        if entry.len() >= self.max_per_minute as usize {
            if let Some(oldest) = entry.first() {
                let until_expiry = Duration::from_secs(60)
                    .saturating_sub(now.duration_since(*oldest));
                if !until_expiry.is_zero() {
                    return Some(until_expiry);
                }
            }
        }

        entry.push(now);
        None
    }

    /// Wait if necessary before making a request to this domain
    pub async fn wait_for(&self, domain: &str) {
        while let Some(wait) = self.check(domain) {
            tracing::debug!("Rate limit hit for {}, sleeping {:?}", domain, wait);
            tokio::time::sleep(wait).await;
        }
    }
}

/// Web page fetcher feeding the summarizer
pub struct WebCrawler {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl WebCrawler {
    pub fn new(rate_limit_ms: u64, max_per_minute: u32) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Crawl(e.to_string()))?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(rate_limit_ms, max_per_minute),
        })
    }

    /// Fetch a URL with rate limiting, returning extracted page text
    pub async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let domain = extract_domain(url).ok_or_else(|| AppError::Crawl("Invalid URL".to_string()))?;

        self.rate_limiter.wait_for(&domain).await;

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| AppError::Crawl(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Crawl(format!("HTTP error: {}", response.status())));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Crawl(e.to_string()))?;

        Ok(extract_content(&html))
    }
}

/// Extract domain from URL
fn extract_domain(url: &str) -> Option<String> {
    url.split('/').nth(2).map(|s| s.to_string())
}

/// Remove every `open`..`close` span, closing tag included
fn strip_between(text: &mut String, open: &str, close: &str) {
    while let Some(start) = text.find(open) {
        match text[start..].find(close) {
            Some(end) => text.replace_range(start..start + end + close.len(), ""),
            None => break,
        }
    }
}

/// Extract main content from HTML (simple parser)
fn extract_content(html: &str) -> String {
    let mut text = html.to_string();

    // Remove script, style and comment blocks
    strip_between(&mut text, "<script", "</script>");
    strip_between(&mut text, "<style", "</style>");
    strip_between(&mut text, "<!--", "-->");

    // Remove all HTML tags
    let mut in_tag = false;
    let mut result = String::new();

    for ch in text.chars() {
        if ch == '<' {
            in_tag = true;
        } else if ch == '>' {
            in_tag = false;
        } else if !in_tag {
            result.push(ch);
        }
    }

    // Clean up whitespace
    let mut clean = String::new();
    let mut last_space = false;

    for ch in result.chars() {
        if ch.is_whitespace() {
            if !last_space {
                clean.push(' ');
                last_space = true;
            }
        } else {
            clean.push(ch);
            last_space = false;
        }
    }

    clean.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://example.com/page").unwrap(),
            "example.com"
        );
        assert_eq!(
            extract_domain("http://news.example.org/path").unwrap(),
            "news.example.org"
        );
        assert!(extract_domain("not-a-url").is_none());
    }

    #[test]
    fn test_extract_content() {
        let html = "<html><head><title>Test</title></head><body><p>Hello World</p></body></html>";
        let content = extract_content(html);
        assert!(content.contains("Hello World"));
    }

    #[test]
    fn test_extract_content_strips_scripts_and_comments() {
        let html = "<body><script>var x = 1;</script><!-- note --><p>Kept</p>\
                    <style>p { color: red }</style></body>";
        let content = extract_content(html);
        assert_eq!(content, "Kept");
    }

    #[test]
    fn test_extract_content_strips_repeated_blocks() {
        let html = "<script>var a;</script><p>One</p><script>var b;</script><p>Two</p>";
        assert_eq!(extract_content(html), "One Two");
    }

    #[test]
    fn test_rate_limiter_allows_distinct_domains() {
        let limiter = RateLimiter::new(60_000, 1);
        // Under their own limits, distinct domains never wait on each other
        assert!(limiter.check("a.example").is_none());
        assert!(limiter.check("b.example").is_none());
        assert!(limiter.check("a.example").is_some());
    }
}
