// src/engine/direct.rs
// Direct engine: persona prompt plus the conversation, straight to the gateway

use crate::error::Result;
use crate::llm::{LlmGateway, Message};
use crate::persona::PersonaOverlay;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Tweet-sized completion budget
pub const DIRECT_MAX_TOKENS: u32 = 280;

pub struct DirectAnswerEngine {
    gateway: Arc<dyn LlmGateway>,
}

impl DirectAnswerEngine {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Answer `chat_messages` in Alva's voice.
    ///
    /// The reply is trimmed and non-empty; an empty completion is `EmptyCompletion`.
    #[instrument(skip_all, fields(messages = chat_messages.len()))]
    pub async fn respond(&self, chat_messages: &[Message]) -> Result<String> {
        let mut messages = Vec::with_capacity(chat_messages.len() + 1);
        messages.push(Message::system(PersonaOverlay::Reply.prompt()));
        messages.extend_from_slice(chat_messages);

        let reply = self
            .gateway
            .complete(messages, DIRECT_MAX_TOKENS, None)
            .await?;
        debug!(reply_len = reply.len(), "direct reply ready");
        Ok(reply)
    }
}
