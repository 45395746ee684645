// src/llm/transport.rs
// Pooled HTTP transport with bounded retry, shared by the gateway and the Alva client

use crate::error::{ReplyError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Retries after the first attempt, matching the usual chat SDK default
const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(500);

/// When and how long to wait before resending a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one (0 = send once)
    pub retries: u32,
    /// Delay before the first retry; doubles for each one after
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            base_backoff: DEFAULT_BASE_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Send once, never resend
    pub const fn once() -> Self {
        Self {
            retries: 0,
            base_backoff: DEFAULT_BASE_BACKOFF,
        }
    }

    /// Delay before retry number `retry` (0-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        self.base_backoff.saturating_mul(1u32 << retry.min(16))
    }

    /// Rate limits and server errors are worth another try
    pub fn retries_status(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    /// Only failures that happened before the server saw the request
    pub fn retries_transport(err: &reqwest::Error) -> bool {
        err.is_connect() || err.is_timeout()
    }
}

/// What one attempt produced
enum Attempt {
    Done(String),
    Retry(String),
    Fail(ReplyError),
}

/// reqwest client plus the retry policy its callers share
pub struct HttpTransport {
    client: Client,
    policy: RetryPolicy,
}

impl HttpTransport {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.policy.retries = retries;
        self
    }

    pub fn with_base_backoff(mut self, base_backoff: Duration) -> Self {
        self.policy.base_backoff = base_backoff;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// POST `body` as JSON with Bearer auth and return the response text
    pub async fn post_json_bearer(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<String> {
        self.send(request_id, body, |client, body| {
            client
                .post(url)
                .bearer_auth(api_key)
                .header("Content-Type", "application/json")
                .body(body)
        })
        .await
    }

    /// Send the request built by `build` until it succeeds, fails for good or
    /// the retry budget runs out. Non-2xx responses become `UpstreamFailure`.
    pub async fn send<F>(&self, request_id: &str, body: String, build: F) -> Result<String>
    where
        F: Fn(&Client, String) -> RequestBuilder,
    {
        let mut retry = 0;
        loop {
            let reason = match self.attempt(build(&self.client, body.clone())).await {
                Attempt::Done(text) => return Ok(text),
                Attempt::Fail(err) => return Err(err),
                Attempt::Retry(reason) if retry < self.policy.retries => reason,
                Attempt::Retry(reason) => return Err(ReplyError::UpstreamFailure(reason)),
            };

            let delay = self.policy.backoff(retry);
            warn!(
                request_id = %request_id,
                retry = retry + 1,
                of = self.policy.retries,
                delay_ms = delay.as_millis() as u64,
                reason = %reason,
                "transient upstream failure, retrying"
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }

    async fn attempt(&self, request: RequestBuilder) -> Attempt {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if RetryPolicy::retries_transport(&e) => {
                return Attempt::Retry(ReplyError::from(e).to_string());
            }
            Err(e) => return Attempt::Fail(e.into()),
        };

        let status = response.status();
        if status.is_success() {
            return match response.text().await {
                Ok(text) => Attempt::Done(text),
                Err(e) => Attempt::Fail(e.into()),
            };
        }

        let error_body = response.text().await.unwrap_or_default();
        debug!(status = %status, body = %error_body, "upstream returned error status");
        let reason = format!("API error {}: {}", status, error_body);
        if RetryPolicy::retries_status(status) {
            Attempt::Retry(reason)
        } else {
            Attempt::Fail(ReplyError::UpstreamFailure(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retries, 2);
        assert_eq!(policy.base_backoff, Duration::from_millis(500));
        assert_eq!(RetryPolicy::once().retries, 0);
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            retries: 3,
            base_backoff: Duration::from_millis(100),
        };
        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(400));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(RetryPolicy::retries_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(RetryPolicy::retries_status(StatusCode::BAD_GATEWAY));
        assert!(!RetryPolicy::retries_status(StatusCode::UNAUTHORIZED));
        assert!(!RetryPolicy::retries_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_builder_overrides() {
        let transport = HttpTransport::new(Duration::from_secs(1), Duration::from_secs(1))
            .with_retries(0)
            .with_base_backoff(Duration::from_millis(5));
        assert_eq!(transport.policy().retries, 0);
        assert_eq!(transport.policy().base_backoff, Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_connection_refused_is_upstream_failure() {
        let transport = HttpTransport::new(Duration::from_millis(500), Duration::from_millis(200))
            .with_retries(1)
            .with_base_backoff(Duration::from_millis(10));
        let err = transport
            .post_json_bearer("test", "http://127.0.0.1:1", "key", "{}".into())
            .await
            .unwrap_err();
        assert!(err.is_upstream(), "expected upstream failure, got: {}", err);
    }
}
