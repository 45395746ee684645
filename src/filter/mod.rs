// src/filter/mod.rs
// Relevance pipeline: decides whether an inbound tweet deserves a reply

pub mod rules;
mod prompts;
mod semantic;
mod simple;

pub use prompts::{SEMANTIC_FILTER_PROMPT, SIMPLE_FILTER_PROMPT};
pub use rules::{HardRuleInput, HardRules};
pub use semantic::{SEMANTIC_MAX_TOKENS, SemanticVerdict, classify_semantic};
pub use simple::{SIMPLE_MAX_TOKENS, SimpleVerdict, classify_simple};

use crate::config::FilterSettings;
use crate::engine::AnswerEngineContext;
use crate::error::Result;
use crate::llm::LlmGateway;
use crate::utils::truncate_chars;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Characters of tweet text included in decision logs
const LOG_PREVIEW_CHARS: usize = 100;
/// Stage name logged for fail-open decisions
const ERROR_STAGE: &str = "error";

/// Which relevance pipeline runs
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FilterMode {
    /// LLM-only yes/no filter
    Alva1,
    /// Hard rules, then the semantic classifier
    #[default]
    Alva2,
}

/// Fixed topic vocabulary for semantic tags
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TopicTag {
    Macro,
    Crypto,
    Earnings,
    Defi,
    Technical,
    Sentiment,
    Regulatory,
    Onchain,
}

/// How a tweet relates to another tweet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    Retweeted,
    Quoted,
    RepliedTo,
}

/// One referenced-tweet relation as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetReference {
    #[serde(rename = "type")]
    pub kind: ReferenceType,
    pub id: String,
}

/// Optional tweet metadata for the hard rules
#[derive(Debug, Clone, Default)]
pub struct RelevanceOptions {
    pub referenced_tweets: Vec<TweetReference>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of a relevance decision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    pub worth_replying_to: bool,
    pub reason: String,
    /// Semantic stage only, in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Semantic stage only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_angle: Option<String>,
    /// Semantic stage only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_tags: Option<Vec<TopicTag>>,
}

impl FilterResult {
    /// Plain decision with no semantic metadata
    pub fn decision(worth_replying_to: bool, reason: impl Into<String>) -> Self {
        Self {
            worth_replying_to,
            reason: reason.into(),
            confidence: None,
            reply_angle: None,
            topic_tags: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self::decision(false, reason)
    }

    /// Fail-open result for a classifier that answered with nothing
    pub fn empty_response() -> Self {
        Self::decision(true, "filter returned empty response")
    }

    /// Fail-open result for any error raised while filtering
    pub fn filter_error(message: impl std::fmt::Display) -> Self {
        Self::decision(true, format!("filter error: {}", message))
    }
}

/// Mode-dispatched relevance filter. Holds configuration only.
pub struct RelevanceFilter {
    gateway: Arc<dyn LlmGateway>,
    mode: FilterMode,
    rules: HardRules,
}

impl RelevanceFilter {
    pub fn new(gateway: Arc<dyn LlmGateway>, mode: FilterMode, rules: HardRules) -> Self {
        Self {
            gateway,
            mode,
            rules,
        }
    }

    pub fn from_settings(gateway: Arc<dyn LlmGateway>, settings: &FilterSettings) -> Self {
        Self::new(gateway, settings.mode, HardRules::from_settings(settings))
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Decide whether `text` is worth replying to.
    ///
    /// Never fails: any error below this point becomes a `filter error:` accept.
    pub async fn check_tweet_relevance(
        &self,
        text: &str,
        ctx: &AnswerEngineContext,
        opts: &RelevanceOptions,
    ) -> FilterResult {
        self.check_tweet_relevance_at(text, ctx, opts, Utc::now()).await
    }

    /// Same as `check_tweet_relevance` with an explicit clock for the age rule
    pub async fn check_tweet_relevance_at(
        &self,
        text: &str,
        _ctx: &AnswerEngineContext,
        opts: &RelevanceOptions,
        now: DateTime<Utc>,
    ) -> FilterResult {
        match self.dispatch(text, opts, now).await {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    mode = %self.mode,
                    error = %e,
                    "tweet filter error, defaulting to reply"
                );
                let result = FilterResult::filter_error(e);
                log_decision(ERROR_STAGE, text, &result);
                result
            }
        }
    }

    async fn dispatch(
        &self,
        text: &str,
        opts: &RelevanceOptions,
        now: DateTime<Utc>,
    ) -> Result<FilterResult> {
        if self.mode == FilterMode::Alva1 {
            let result = classify_simple(self.gateway.as_ref(), text).await?;
            log_decision("alva1", text, &result);
            return Ok(result);
        }

        let input = HardRuleInput {
            text,
            referenced_tweets: &opts.referenced_tweets,
            created_at: opts.created_at,
        };
        if let Some(result) = self.rules.evaluate(&input, now) {
            log_decision("alva2/hard", text, &result);
            return Ok(result);
        }

        let result = classify_semantic(self.gateway.as_ref(), text).await?;
        log_decision("alva2/semantic", text, &result);
        Ok(result)
    }
}

fn log_decision(stage: &str, text: &str, result: &FilterResult) {
    info!(
        stage = stage,
        tweet = %truncate_chars(text, LOG_PREVIEW_CHARS),
        worth_replying_to = result.worth_replying_to,
        reason = %result.reason,
        confidence = ?result.confidence,
        reply_angle = ?result.reply_angle,
        topic_tags = ?result.topic_tags,
        "tweet filter decision"
    );
}
