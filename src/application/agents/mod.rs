//! Agents - one wrapper per external AI capability
//!
//! Each agent pairs a fixed system prompt with one kind of call:
//! image/video description, web research, page summarization, tweet
//! analysis, and reply generation.

pub mod analyzer;
pub mod image;
pub mod reply;
pub mod search;
pub mod video;
pub mod web_content;

pub use analyzer::TweetAnalyzer;
pub use image::ImageDescriber;
pub use reply::ReplyGenerator;
pub use search::InternetSearch;
pub use video::VideoDescriber;
pub use web_content::WebContent;
