// src/engine/composite.rs
// Composite engine: Alva domain pass, then an Alva-voice rewrite

use crate::alva::DomainChat;
use crate::error::{ReplyError, Result};
use crate::llm::{LlmGateway, Message, Role};
use crate::persona::PersonaOverlay;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Tweet-sized rewrite budget
pub const REWRITE_MAX_TOKENS: u32 = 280;

/// Concatenate the user-role message bodies in order, one per line
pub fn extract_user_intent(messages: &[Message]) -> String {
    messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// User message for the rewrite pass
pub fn rewrite_message(query: &str, material: &str) -> String {
    format!(
        "Here is the user's query:\n{}\n\nHere is the response material:\n{}",
        query, material
    )
}

pub struct CompositeAnswerEngine {
    domain: Arc<dyn DomainChat>,
    gateway: Arc<dyn LlmGateway>,
}

impl CompositeAnswerEngine {
    pub fn new(domain: Arc<dyn DomainChat>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self { domain, gateway }
    }

    /// Run the domain pass, then restyle its material into a tweet.
    #[instrument(skip_all, fields(messages = chat_messages.len()))]
    pub async fn respond(&self, chat_messages: &[Message]) -> Result<String> {
        let intent = extract_user_intent(chat_messages);

        let material = self.domain.generate_response(&intent).await?;
        debug!(material = %material, "domain material");

        let messages = vec![
            Message::system(PersonaOverlay::Rewrite.prompt()),
            Message::user(rewrite_message(&intent, &material)),
        ];

        let rewrite = match self
            .gateway
            .complete(messages, REWRITE_MAX_TOKENS, None)
            .await
        {
            Ok(text) => text,
            Err(ReplyError::EmptyCompletion) => return Err(ReplyError::EmptyRewrite),
            Err(e) => return Err(e),
        };

        debug!(rewrite = %rewrite, "tweet rewrite");
        info!(
            material_len = material.len(),
            rewrite_len = rewrite.len(),
            "composite reply ready"
        );
        Ok(rewrite)
    }
}
