//! Infrastructure layer - External services
//!
//! This layer contains:
//! - Config: YAML configuration and env-provided credentials
//! - LLM: multi-provider AI chat interface
//! - Twitter: FxTwitter tweet fetching
//! - Webcrawler: rate-limited page fetching for link summaries
//! - Media: image download and data-URL encoding

pub mod config;
pub mod llm;
pub mod media;
pub mod twitter;
pub mod webcrawler;
