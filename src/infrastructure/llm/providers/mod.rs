//! LLM Providers

pub mod openai;
pub mod perplexity;

pub use openai::OpenAIProvider;
pub use perplexity::PerplexityProvider;
