// src/llm/openai_compat.rs
// OpenAI-compatible chat-completions request builder and response parser

use crate::error::{ReplyError, Result};
use crate::llm::{ChatResult, Message, Usage};
use serde::{Deserialize, Serialize};

/// Chat completion request (OpenAI-compatible format)
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature (0.0 to 2.0); `None` leaves the service default
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: Option<ResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Parse an OpenAI-compatible chat response into a ChatResult.
///
/// A body that is not a chat response at all is an upstream failure; a valid
/// response without content yields `content: None`.
pub fn parse_chat_response(
    response_body: &str,
    request_id: &str,
    duration_ms: u64,
) -> Result<ChatResult> {
    let data: ChatResponse = serde_json::from_str(response_body).map_err(|e| {
        ReplyError::UpstreamFailure(format!("failed to parse chat response: {}", e))
    })?;

    let (content, finish_reason) = match data.choices.into_iter().next() {
        Some(choice) => (choice.message.and_then(|m| m.content), choice.finish_reason),
        None => (None, None),
    };

    Ok(ChatResult {
        request_id: request_id.to_owned(),
        content,
        finish_reason,
        usage: data.usage,
        duration_ms,
    })
}
