// src/fixtures.rs
// Recorded conversation fixtures for exercising an answer engine end to end

use crate::engine::Query;
use crate::llm::Message;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

/// Tweet metadata attached to a fixture
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureMessage {
    pub prompt_tweet_id: String,
    pub prompt_username: String,
}

/// One recorded conversation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCase {
    pub message: FixtureMessage,
    #[serde(default)]
    pub chat_messages: Vec<Message>,
}

impl FixtureCase {
    pub fn to_query(&self) -> Query {
        Query::new(
            self.message.prompt_tweet_id.clone(),
            self.message.prompt_username.clone(),
            self.chat_messages.clone(),
        )
    }
}

/// Parse a JSON array of fixtures
pub fn parse_fixtures(json: &str) -> Result<Vec<FixtureCase>> {
    serde_json::from_str(json).context("Failed to parse fixtures")
}

pub fn load_fixtures(path: &Path) -> Result<Vec<FixtureCase>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixtures from {}", path.display()))?;
    parse_fixtures(&content)
}

/// Check the reply invariants: non-empty and already trimmed
pub fn check_reply(reply: &str) -> Result<()> {
    if reply.is_empty() {
        bail!("reply is empty");
    }
    if reply.trim() != reply {
        bail!("reply has leading or trailing whitespace");
    }
    Ok(())
}
