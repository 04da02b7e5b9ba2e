//! reply-guy - fetch a tweet, understand it, draft replies
//!
//! A sequential pipeline of external API calls: FxTwitter for tweet data,
//! vision models for media, a crawler plus LLM for linked pages, Perplexity
//! for optional web research, and chat models for analysis and replies.

pub mod application;
pub mod domain;
pub mod infrastructure;
