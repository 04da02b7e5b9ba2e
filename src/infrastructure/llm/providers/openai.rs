//! OpenAI Provider - chat, vision and tool calling

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::llm::{
    AssistantTurn, LLMError, LLMMessage, LLMResponse, LLMResult, LLMUsage, ToolCall,
    ToolDefinition, LLM,
};

/// OpenAI API endpoint
const API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI provider
pub struct OpenAIProvider {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            model: model.unwrap_or("gpt-4o").to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Point the provider at an OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Completions URL for this endpoint
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send_request(&self, request: &ChatRequest) -> LLMResult<ChatResponse> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| LLMError::NetworkError(e.to_string()))?;

        if response.status() == 429 {
            return Err(LLMError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError(format!(
                "status: {}, body: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(e.to_string()))
    }
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<LLMMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

impl ChatRequest {
    fn new(model: &str, messages: Vec<LLMMessage>) -> Self {
        Self {
            model: model.to_string(),
            messages,
            temperature: None,
            max_tokens: None,
            n: None,
            tools: None,
            tool_choice: None,
        }
    }
}

/// API response structure
#[derive(Deserialize, Debug)]
struct ChatResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

/// Choice in response
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

/// Response message
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

/// Usage information
#[derive(Deserialize, Debug)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl From<Usage> for LLMUsage {
    fn from(u: Usage) -> Self {
        Self {
            prompt_tokens: Some(u.prompt_tokens),
            completion_tokens: Some(u.completion_tokens),
            total_tokens: Some(u.total_tokens),
        }
    }
}

#[async_trait]
impl LLM for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(
        &self,
        messages: Vec<LLMMessage>,
        model: Option<&str>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LLMResult<LLMResponse> {
        let model = model.unwrap_or(&self.model);

        let mut request = ChatRequest::new(model, messages);
        request.temperature = temperature;
        request.max_tokens = max_tokens;

        let chat_response = self.send_request(&request).await?;
        let usage = chat_response.usage.map(LLMUsage::from);

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::InvalidRequest("No choices in response".to_string()))?;

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            model: chat_response.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    async fn chat_n(
        &self,
        messages: Vec<LLMMessage>,
        n: u32,
        model: Option<&str>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LLMResult<Vec<String>> {
        let model = model.unwrap_or(&self.model);

        let mut request = ChatRequest::new(model, messages);
        request.temperature = temperature;
        request.max_tokens = max_tokens;
        request.n = Some(n);

        let chat_response = self.send_request(&request).await?;

        if chat_response.choices.is_empty() {
            return Err(LLMError::InvalidRequest(
                "No choices in response".to_string(),
            ));
        }

        Ok(chat_response
            .choices
            .into_iter()
            .map(|c| c.message.content.unwrap_or_default())
            .collect())
    }

    async fn chat_with_tools(
        &self,
        messages: Vec<LLMMessage>,
        tools: &[ToolDefinition],
        model: Option<&str>,
        temperature: Option<f32>,
    ) -> LLMResult<AssistantTurn> {
        let model = model.unwrap_or(&self.model);

        let mut request = ChatRequest::new(model, messages);
        request.temperature = temperature;
        request.tools = Some(tools.to_vec());
        request.tool_choice = Some("auto".to_string());

        let chat_response = self.send_request(&request).await?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::InvalidRequest("No choices in response".to_string()))?;

        Ok(AssistantTurn {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
        })
    }
}
