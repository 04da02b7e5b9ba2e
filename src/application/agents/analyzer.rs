//! Tweet analysis agent

use std::sync::Arc;

use crate::application::errors::AppError;
use crate::application::tools::ToolRegistry;
use crate::infrastructure::llm::{LLMConfig, LLMMessage, ModelRole, LLM};

const SYSTEM_PROMPT: &str = "\
You are an expert tweet analyzer. Your task is to analyze the given tweet and provide insights on the following aspects:
1. Sentiment: Determine if the overall sentiment is positive, negative, or neutral.
2. Topics: Identify the main topics or themes discussed in the tweet.
3. Entities: Recognize and list any notable entities (people, organizations, products, etc.) mentioned.
4. Language: Detect the language used in the tweet.
5. Tone: Describe the overall tone (e.g., formal, casual, humorous, sarcastic, etc.).";

const TOOLS_SYSTEM_PROMPT: &str = "\
Role: You are an expert at analyzing social media content, especially tweets.

Instructions: Analyze the given tweet and provide insights on:
1. Sentiment: Determine if the overall sentiment is positive, negative, or neutral.
2. Topics: Identify the main topics or themes discussed.
3. Entities: Recognize notable entities (people, organizations, products, etc.).
4. Context: Provide relevant background information using the available tools.
5. Tone: Describe the overall tone (formal, casual, humorous, sarcastic, etc.).

Function calling: Use the supplied tools to help analyze the tweet.
Available tools:
";

/// Hard stop for runaway tool loops
const MAX_TOOL_ROUNDS: usize = 8;

/// Produces a structured analysis of a tweet context block
pub struct TweetAnalyzer {
    llm: Arc<dyn LLM>,
    model: String,
    temperature: f32,
}

impl TweetAnalyzer {
    pub fn new(llm: Arc<dyn LLM>, config: &LLMConfig) -> Self {
        Self {
            llm,
            model: config.model(ModelRole::Chat).to_string(),
            temperature: config.temperature,
        }
    }

    /// Analyze the rendered tweet context in one shot
    pub async fn analyze(&self, context: &str) -> Result<String, AppError> {
        tracing::info!("Analyzing tweet: {:.50}...", context);

        let messages = vec![
            LLMMessage::system(SYSTEM_PROMPT),
            LLMMessage::user(format!("Analyze the following tweet:\n{}", context)),
        ];

        let response = self
            .llm
            .chat(messages, Some(self.model.as_str()), Some(self.temperature), None)
            .await?;

        tracing::info!("Tweet analysis completed");
        Ok(response.content)
    }

    /// Analyze with a function-calling loop over the registered tools
    pub async fn analyze_with_tools(
        &self,
        context: &str,
        registry: &ToolRegistry,
    ) -> Result<String, AppError> {
        tracing::info!("Analyzing tweet with tools: {:.50}...", context);

        let tool_list = registry
            .descriptions()
            .into_iter()
            .map(|(name, desc)| format!("   - `{}`: {}", name, desc))
            .collect::<Vec<_>>()
            .join("\n");
        let system_prompt = format!("{}{}", TOOLS_SYSTEM_PROMPT, tool_list);

        let tools = registry.definitions();
        let mut messages = vec![
            LLMMessage::system(system_prompt),
            LLMMessage::user(format!("Analyze this tweet:\n\n{}", context)),
        ];

        for round in 0..MAX_TOOL_ROUNDS {
            let turn = self
                .llm
                .chat_with_tools(
                    messages.clone(),
                    &tools,
                    Some(self.model.as_str()),
                    Some(self.temperature),
                )
                .await?;

            if turn.tool_calls.is_empty() {
                tracing::info!("Analysis complete after {} tool rounds", round);
                return Ok(turn.content.unwrap_or_default());
            }

            messages.push(turn.to_message());
            for call in &turn.tool_calls {
                tracing::info!("Processing tool call: {}", call.function.name);
                let result = match registry
                    .execute(&call.function.name, &call.function.arguments)
                    .await
                {
                    Ok(output) => output,
                    Err(e) => {
                        // The model sees the failure and can carry on without the tool
                        tracing::warn!("Tool execution failed: {}", e);
                        format!("Error: {}", e)
                    }
                };
                messages.push(LLMMessage::tool(call.id.clone(), result));
            }
        }

        tracing::warn!("Giving up after {} tool rounds, analyzing without tools", MAX_TOOL_ROUNDS);
        self.analyze(context).await
    }
}
