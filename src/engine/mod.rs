// src/engine/mod.rs
// Answer engines: turn a query into a tweet-ready reply

mod composite;
mod direct;

pub use composite::{CompositeAnswerEngine, REWRITE_MAX_TOKENS, extract_user_intent, rewrite_message};
pub use direct::{DIRECT_MAX_TOKENS, DirectAnswerEngine};

use crate::alva::AlvaClient;
use crate::config::EnvConfig;
use crate::error::{ReplyError, Result};
use crate::llm::{LlmGateway, Message, OpenAiClient};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tracing::{info, instrument};

/// Engine variant tag
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EngineKind {
    /// Persona prompt straight to the LLM gateway
    OpenAi,
    /// Alva domain pass followed by a rewrite
    Alva,
}

impl EngineKind {
    /// Parse a variant tag, mapping a miss to `UnknownEngine`
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.trim()
            .parse()
            .map_err(|_| ReplyError::UnknownEngine(tag.to_string()))
    }
}

/// A request to produce a reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub prompt_tweet_id: String,
    pub prompt_username: String,
    #[serde(default)]
    pub chat_messages: Vec<Message>,
}

impl Query {
    pub fn new(
        prompt_tweet_id: impl Into<String>,
        prompt_username: impl Into<String>,
        chat_messages: Vec<Message>,
    ) -> Self {
        Self {
            prompt_tweet_id: prompt_tweet_id.into(),
            prompt_username: prompt_username.into(),
            chat_messages,
        }
    }
}

/// Social-platform client owned by the caller. The core never inspects it.
pub type PlatformClient = Arc<dyn Any + Send + Sync>;

/// Ambient references handed to every engine call. Read-only to the core.
#[derive(Clone)]
pub struct AnswerEngineContext {
    pub platform_client: PlatformClient,
    pub bot_handle: String,
    pub bot_user_id: String,
    pub answer_engine: Arc<AnswerEngine>,
}

impl AnswerEngineContext {
    pub fn new(
        platform_client: PlatformClient,
        bot_handle: impl Into<String>,
        bot_user_id: impl Into<String>,
        answer_engine: Arc<AnswerEngine>,
    ) -> Self {
        Self {
            platform_client,
            bot_handle: bot_handle.into(),
            bot_user_id: bot_user_id.into(),
            answer_engine,
        }
    }
}

/// Closed set of answer engines
pub enum AnswerEngine {
    Direct(DirectAnswerEngine),
    Composite(CompositeAnswerEngine),
}

impl AnswerEngine {
    pub fn kind(&self) -> EngineKind {
        match self {
            AnswerEngine::Direct(_) => EngineKind::OpenAi,
            AnswerEngine::Composite(_) => EngineKind::Alva,
        }
    }

    /// Produce a reply for `query`. Errors propagate; nothing is retried here.
    #[instrument(skip_all, fields(engine = %self.kind(), tweet_id = %query.prompt_tweet_id))]
    pub async fn generate_response_for_query(
        &self,
        query: &Query,
        _ctx: &AnswerEngineContext,
    ) -> Result<String> {
        let reply = match self {
            AnswerEngine::Direct(engine) => engine.respond(&query.chat_messages).await?,
            AnswerEngine::Composite(engine) => engine.respond(&query.chat_messages).await?,
        };
        info!(
            username = %query.prompt_username,
            reply_len = reply.len(),
            "reply generated"
        );
        Ok(reply)
    }
}

/// Builds engines from frozen configuration
pub struct AnswerEngineFactory {
    config: EnvConfig,
}

impl AnswerEngineFactory {
    pub fn new(config: EnvConfig) -> Self {
        Self { config }
    }

    /// Factory over the process environment and config file
    pub fn from_env() -> Self {
        Self::new(EnvConfig::load())
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// LLM gateway from the `[llm]` settings
    pub fn gateway(&self) -> Result<Arc<dyn LlmGateway>> {
        Ok(Arc::new(OpenAiClient::from_settings(&self.config.llm)?))
    }

    /// Build a fresh engine for `kind`. Missing secrets are `ConfigurationMissing`.
    pub fn create(&self, kind: EngineKind) -> Result<AnswerEngine> {
        let gateway = self.gateway()?;
        let engine = match kind {
            EngineKind::OpenAi => AnswerEngine::Direct(DirectAnswerEngine::new(gateway)),
            EngineKind::Alva => {
                let domain = Arc::new(AlvaClient::new(&self.config.alva)?);
                AnswerEngine::Composite(CompositeAnswerEngine::new(domain, gateway))
            }
        };
        info!(engine = %kind, "answer engine created");
        Ok(engine)
    }
}

/// Create an engine by tag using the process configuration
pub fn create_answer_engine(tag: &str) -> Result<AnswerEngine> {
    let kind = EngineKind::from_tag(tag)?;
    AnswerEngineFactory::from_env().create(kind)
}
