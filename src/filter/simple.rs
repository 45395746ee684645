// src/filter/simple.rs
// Single-axis yes/no LLM filter (alva1 mode)

use crate::error::{ReplyError, Result};
use crate::filter::FilterResult;
use crate::filter::prompts::SIMPLE_FILTER_PROMPT;
use crate::llm::{LlmGateway, Message};
use crate::utils::strip_code_fences;
use serde::Deserialize;

pub const SIMPLE_MAX_TOKENS: u32 = 150;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimpleVerdict {
    #[serde(default)]
    pub worth_replying_to: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl SimpleVerdict {
    pub fn into_result(self) -> FilterResult {
        FilterResult::decision(
            self.worth_replying_to.unwrap_or(false),
            self.reason.unwrap_or_default(),
        )
    }
}

/// Run the yes/no classifier. An empty answer accepts the tweet.
pub async fn classify_simple(gateway: &dyn LlmGateway, tweet_text: &str) -> Result<FilterResult> {
    let messages = vec![
        Message::system(SIMPLE_FILTER_PROMPT),
        Message::user(tweet_text),
    ];

    let content = match gateway.complete(messages, SIMPLE_MAX_TOKENS, Some(0.0)).await {
        Ok(content) => content,
        Err(ReplyError::EmptyCompletion) => return Ok(FilterResult::empty_response()),
        Err(e) => return Err(e),
    };

    let verdict: SimpleVerdict = serde_json::from_str(strip_code_fences(&content))?;
    Ok(verdict.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_true() {
        let v: SimpleVerdict =
            serde_json::from_str(r#"{"worth_replying_to": true, "reason": "fed policy"}"#).unwrap();
        let result = v.into_result();
        assert!(result.worth_replying_to);
        assert_eq!(result.reason, "fed policy");
        assert!(result.confidence.is_none());
    }

    #[test]
    fn test_verdict_missing_fields() {
        let v: SimpleVerdict = serde_json::from_str("{}").unwrap();
        let result = v.into_result();
        assert!(!result.worth_replying_to);
        assert_eq!(result.reason, "");
    }
}
