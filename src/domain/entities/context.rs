//! Tweet context - aggregated input for the analyzer

use super::tweet::Tweet;

/// Everything gathered about a tweet before analysis
#[derive(Debug, Clone)]
pub struct TweetContext {
    pub tweet: Tweet,
    /// One description per media attachment, in tweet order
    pub media_descriptions: Vec<String>,
    /// (url, summary) per external link
    pub link_summaries: Vec<(String, String)>,
    /// Findings from the optional research pass
    pub search_findings: Option<String>,
}

impl TweetContext {
    pub fn new(tweet: Tweet) -> Self {
        Self {
            tweet,
            media_descriptions: Vec::new(),
            link_summaries: Vec::new(),
            search_findings: None,
        }
    }

    /// Render the Markdown context block handed to the analyzer
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("## Tweet Text\n\n");
        out.push_str(&self.tweet.text);
        out.push_str("\n\n## Tweet Author\n\n");
        out.push_str(&format!(
            "{} (@{})\n",
            self.tweet.author.name, self.tweet.author.screen_name
        ));

        if !self.media_descriptions.is_empty() {
            out.push_str("\n## Tweet Media Descriptions\n\n");
            for desc in &self.media_descriptions {
                out.push_str(&format!("- {}\n", desc));
            }
        }

        if let Some(quote) = &self.tweet.quote {
            out.push_str("\n## Quoted Tweet\n\n### Quote Text\n\n");
            out.push_str(&quote.text);
            out.push_str("\n\n### Quote Author\n\n");
            out.push_str(&format!(
                "{} (@{})\n",
                quote.author.name, quote.author.screen_name
            ));
        }

        if !self.link_summaries.is_empty() {
            out.push_str("\n## Linked Content\n\n");
            for (url, summary) in &self.link_summaries {
                out.push_str(&format!("### {}\n\n{}\n\n", url, summary));
            }
        }

        if let Some(findings) = &self.search_findings {
            out.push_str("\n## Web Research\n\n");
            out.push_str(findings);
            out.push('\n');
        }

        out
    }
}
