// src/error.rs
// Error kinds shared by the gateway, the Alva client, the filter and the engines

use thiserror::Error;

/// Main error type for the reply core
#[derive(Error, Debug)]
pub enum ReplyError {
    /// A required secret or setting was absent when a component was built
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Transport error, non-2xx status or deadline expiry from an upstream call
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("LLM returned an empty completion")]
    EmptyCompletion,

    #[error("LLM returned an empty response during tweet rewrite")]
    EmptyRewrite,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unknown answer engine: {0}")]
    UnknownEngine(String),
}

/// Convenience type alias for Result using ReplyError
pub type Result<T> = std::result::Result<T, ReplyError>;

impl ReplyError {
    /// True when the failure came from the network side rather than our own parsing
    pub fn is_upstream(&self) -> bool {
        matches!(self, ReplyError::UpstreamFailure(_))
    }
}

impl From<reqwest::Error> for ReplyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReplyError::UpstreamFailure(format!("request timed out: {}", err))
        } else {
            ReplyError::UpstreamFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ReplyError {
    fn from(err: serde_json::Error) -> Self {
        ReplyError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Display
    // ============================================================================

    #[test]
    fn test_configuration_missing_error() {
        let err = ReplyError::ConfigurationMissing("ALVA_JWT_TOKEN is required".to_string());
        assert!(err.to_string().contains("configuration missing"));
        assert!(err.to_string().contains("ALVA_JWT_TOKEN"));
    }

    #[test]
    fn test_upstream_failure_error() {
        let err = ReplyError::UpstreamFailure("API error 502: bad gateway".to_string());
        assert!(err.to_string().contains("upstream failure"));
        assert!(err.is_upstream());
    }

    #[test]
    fn test_empty_errors() {
        assert!(ReplyError::EmptyCompletion.to_string().contains("empty completion"));
        assert!(ReplyError::EmptyRewrite.to_string().contains("tweet rewrite"));
        assert!(!ReplyError::EmptyRewrite.is_upstream());
    }

    #[test]
    fn test_unknown_engine_error() {
        let err = ReplyError::UnknownEngine("perplexity".to_string());
        assert_eq!(err.to_string(), "unknown answer engine: perplexity");
    }

    // ============================================================================
    // From implementations
    // ============================================================================

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: ReplyError = json_err.into();
        assert!(matches!(err, ReplyError::MalformedResponse(_)));
        assert!(err.to_string().starts_with("malformed response"));
    }
}
