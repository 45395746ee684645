// src/filter/semantic.rs
// Three-axis LLM classifier (topic match, incremental value, appropriateness)

use crate::error::Result;
use crate::filter::prompts::SEMANTIC_FILTER_PROMPT;
use crate::filter::{FilterResult, TopicTag};
use crate::llm::{LlmGateway, Message};
use crate::utils::strip_code_fences;
use serde::Deserialize;
use tracing::debug;

pub const SEMANTIC_MAX_TOKENS: u32 = 250;

/// Classifier JSON as the model returns it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemanticVerdict {
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reply_angle: Option<String>,
    #[serde(default)]
    pub topic_tags: Option<Vec<String>>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl SemanticVerdict {
    /// Map onto a FilterResult. Tags outside the vocabulary are dropped and
    /// confidence is clamped to [0, 1].
    pub fn into_result(self) -> FilterResult {
        let topic_tags = self.topic_tags.map(|tags| {
            let mut known: Vec<TopicTag> = Vec::with_capacity(tags.len());
            for raw in tags {
                match raw.trim().to_ascii_lowercase().parse::<TopicTag>() {
                    Ok(tag) if !known.contains(&tag) => known.push(tag),
                    Ok(_) => {}
                    Err(_) => debug!(tag = %raw, "Dropping topic tag outside vocabulary"),
                }
            }
            known
        });

        FilterResult {
            worth_replying_to: self.decision.as_deref() == Some("reply"),
            reason: self.reason.unwrap_or_default(),
            confidence: self
                .confidence
                .filter(|c| c.is_finite())
                .map(|c| c.clamp(0.0, 1.0)),
            reply_angle: self.reply_angle,
            topic_tags,
        }
    }
}

/// Run the semantic classifier. Empty content, bad JSON and upstream errors
/// are returned to the caller.
pub async fn classify_semantic(gateway: &dyn LlmGateway, tweet_text: &str) -> Result<FilterResult> {
    let messages = vec![
        Message::system(SEMANTIC_FILTER_PROMPT),
        Message::user(tweet_text),
    ];

    let content = gateway
        .complete(messages, SEMANTIC_MAX_TOKENS, Some(0.0))
        .await?;

    let verdict: SemanticVerdict = serde_json::from_str(strip_code_fences(&content))?;
    Ok(verdict.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(json: &str) -> FilterResult {
        serde_json::from_str::<SemanticVerdict>(json).unwrap().into_result()
    }

    #[test]
    fn test_reply_decision_maps_all_fields() {
        let result = verdict(
            r#"{"decision":"reply","confidence":0.82,"reply_angle":"compare funding regimes","topic_tags":["crypto","technical"],"reason":"analytic tone"}"#,
        );
        assert!(result.worth_replying_to);
        assert_eq!(result.reason, "analytic tone");
        assert_eq!(result.confidence, Some(0.82));
        assert_eq!(result.reply_angle.as_deref(), Some("compare funding regimes"));
        assert_eq!(result.topic_tags, Some(vec![TopicTag::Crypto, TopicTag::Technical]));
    }

    #[test]
    fn test_skip_decision() {
        let result = verdict(r#"{"decision":"skip","confidence":0.9,"reason":"personal update"}"#);
        assert!(!result.worth_replying_to);
        assert_eq!(result.reason, "personal update");
        assert!(result.topic_tags.is_none());
    }

    #[test]
    fn test_missing_decision_is_skip() {
        let result = verdict(r#"{"reason":"unsure"}"#);
        assert!(!result.worth_replying_to);
    }

    #[test]
    fn test_unknown_tags_dropped_and_deduplicated() {
        let result = verdict(r#"{"decision":"reply","topic_tags":["Crypto","memes","crypto","onchain"]}"#);
        assert_eq!(result.topic_tags, Some(vec![TopicTag::Crypto, TopicTag::Onchain]));
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(verdict(r#"{"decision":"reply","confidence":1.7}"#).confidence, Some(1.0));
        assert_eq!(verdict(r#"{"decision":"reply","confidence":-0.2}"#).confidence, Some(0.0));
    }

    #[test]
    fn test_missing_reason_is_empty() {
        assert_eq!(verdict(r#"{"decision":"reply"}"#).reason, "");
    }
}
