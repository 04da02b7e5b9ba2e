//! LLM integration - Multi-provider AI support

pub mod config;
pub mod providers;
pub mod traits;

#[cfg(test)]
mod tests;

pub use config::{LLMConfig, LLMProvider, ModelRole};
pub use providers::{OpenAIProvider, PerplexityProvider};
pub use traits::{
    AssistantTurn, ContentPart, FunctionCall, FunctionSpec, ImageUrl, LLMError, LLMMessage,
    LLMResponse, LLMResult, LLMUsage, MessageContent, ToolCall, ToolDefinition, LLM,
};
