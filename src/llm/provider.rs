// src/llm/provider.rs
// Gateway abstraction over a chat-completion service

use crate::error::{ReplyError, Result};
use crate::llm::{ChatRequest, ChatResult, Message};
use async_trait::async_trait;

/// Trait for chat-completion gateways. Implementations hold only configuration.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one chat-completion request
    async fn chat(&self, request: ChatRequest) -> Result<ChatResult>;

    /// Model id used for requests built by `complete`
    fn model_name(&self) -> String;

    /// Complete a conversation and return the first choice's text, trimmed.
    ///
    /// A well-formed response without usable text is `EmptyCompletion`.
    async fn complete(
        &self,
        messages: Vec<Message>,
        max_tokens: u32,
        temperature: Option<f32>,
    ) -> Result<String> {
        let request = ChatRequest::new(self.model_name(), messages)
            .with_max_tokens(max_tokens)
            .with_temperature(temperature);

        let result = self.chat(request).await?;
        result
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ReplyError::EmptyCompletion)
    }
}
