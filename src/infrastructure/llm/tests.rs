//! Integration tests for LLM providers

use crate::infrastructure::llm::{
    LLMConfig, LLMError, LLMMessage, LLMProvider, OpenAIProvider, PerplexityProvider, LLM,
};

#[tokio::test]
#[ignore] // Requires OPENAI_API_KEY environment variable
async fn test_openai_chat() {
    let config = LLMConfig::from_env();
    let api_key = config
        .api_key(LLMProvider::OpenAI)
        .expect("OPENAI_API_KEY not set");

    let provider = OpenAIProvider::new(api_key, Some("gpt-4o-mini"));

    let messages = vec![
        LLMMessage::system("You are a helpful assistant."),
        LLMMessage::user("What is 2+2?"),
    ];

    let response = provider
        .chat(messages, None, Some(0.7), Some(100))
        .await
        .expect("Chat request failed");

    println!("Response: {}", response.content);
    println!("Model: {}", response.model);

    assert!(!response.content.is_empty());
}

#[tokio::test]
#[ignore] // Requires OPENAI_API_KEY environment variable
async fn test_openai_chat_n_returns_n_choices() {
    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");

    let provider = OpenAIProvider::new(api_key, Some("gpt-4o-mini"));

    let messages = vec![LLMMessage::user("Say 'hello' in exactly one word.")];

    let completions = provider
        .chat_n(messages, 3, None, Some(0.9), Some(10))
        .await
        .expect("Chat request failed");

    assert_eq!(completions.len(), 3);
}

#[tokio::test]
#[ignore] // Requires PERPLEXITY_API_KEY environment variable
async fn test_perplexity_search() {
    let api_key = std::env::var("PERPLEXITY_API_KEY").expect("PERPLEXITY_API_KEY not set");

    let provider = PerplexityProvider::new(api_key, None);

    let messages = vec![
        LLMMessage::system("You are a helpful assistant that searches the internet."),
        LLMMessage::user("Search the internet for: current Rust stable version"),
    ];

    let response = provider
        .chat(messages, None, Some(0.2), Some(200))
        .await
        .expect("Search request failed");

    assert!(!response.content.is_empty());
}

#[tokio::test]
async fn test_tool_calls_unsupported_on_perplexity() {
    let provider = PerplexityProvider::new("dummy", None);
    let result = provider
        .chat_with_tools(vec![LLMMessage::user("hi")], &[], None, None)
        .await;

    assert!(matches!(result, Err(LLMError::Unsupported(_))));
}
