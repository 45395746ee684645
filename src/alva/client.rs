// src/alva/client.rs
// Alva chat API client (single POST, NDJSON body)

use crate::alva::stream::parse_stream_response;
use crate::config::AlvaSettings;
use crate::error::{ReplyError, Result};
use crate::llm::{HttpTransport, RetryPolicy};
use async_trait::async_trait;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Wall-clock deadline for a whole chat call
const CHAT_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

const SESSION_KIND: &str = "Ask";
const TIMEZONE: &str = "Asia/Shanghai";
const TIMEZONE_OFFSET_MIN: i32 = 480;

/// Source of domain material for the composite engine
#[async_trait]
pub trait DomainChat: Send + Sync {
    /// Ask the domain backend and return its assembled answer
    async fn generate_response(&self, message: &str) -> Result<String>;
}

/// Body of `POST <base>/chat`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlvaChatRequest {
    pub message: String,
    pub skill_id: String,
    pub session_kind: String,
    pub input_image_urls: Vec<String>,
    pub timezone: String,
    pub timezone_offset_min: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AlvaChatRequest {
    pub fn ask(message: impl Into<String>, skill_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            skill_id: skill_id.into(),
            session_kind: SESSION_KIND.to_string(),
            input_image_urls: Vec::new(),
            timezone: TIMEZONE.to_string(),
            timezone_offset_min: TIMEZONE_OFFSET_MIN,
            session_id: None,
        }
    }
}

/// Alva API client
pub struct AlvaClient {
    api_base_url: String,
    jwt_token: String,
    skill_id: String,
    http: HttpTransport,
}

impl AlvaClient {
    /// Build from settings. A missing JWT token is a configuration error.
    pub fn new(settings: &AlvaSettings) -> Result<Self> {
        let jwt_token = settings
            .jwt_token
            .clone()
            .ok_or_else(|| ReplyError::ConfigurationMissing("ALVA_JWT_TOKEN is required".into()))?;

        Ok(Self {
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            jwt_token,
            skill_id: settings.skill_id.clone(),
            // The chat call is not idempotent; send it once
            http: HttpTransport::new(CHAT_TIMEOUT, CONNECT_TIMEOUT).with_policy(RetryPolicy::once()),
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn skill_id(&self) -> &str {
        &self.skill_id
    }

    fn chat_url(&self) -> String {
        format!("{}/chat", self.api_base_url)
    }
}

#[async_trait]
impl DomainChat for AlvaClient {
    #[instrument(skip(self, message), fields(request_id, message_len = message.len()))]
    async fn generate_response(&self, message: &str) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        tracing::Span::current().record("request_id", request_id.as_str());

        let body = serde_json::to_string(&AlvaChatRequest::ask(message, &self.skill_id))?;
        let url = self.chat_url();

        let raw = self
            .http
            .send(&request_id, body, |client, body| {
                client
                    .post(url.as_str())
                    .header("Authorization", self.jwt_token.as_str())
                    .header("X-Platform", "api")
                    .header("Content-Type", "application/json")
                    .timeout(CHAT_TIMEOUT)
                    .body(body)
            })
            .await?;

        let parsed = parse_stream_response(&raw);
        if parsed.skipped_lines > 0 {
            debug!(
                request_id = %request_id,
                skipped = parsed.skipped_lines,
                "Skipped undecodable stream lines"
            );
        }

        info!(
            request_id = %request_id,
            session_id = ?parsed.session_id,
            answer_id = ?parsed.answer_id,
            answer_len = parsed.answer.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Alva chat complete"
        );

        Ok(parsed.answer)
    }
}
