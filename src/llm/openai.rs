// src/llm/openai.rs
// OpenAI chat-completions client

use crate::config::LlmSettings;
use crate::error::{ReplyError, Result};
use crate::llm::transport::HttpTransport;
use crate::llm::provider::LlmGateway;
use crate::llm::{ChatRequest, ChatResult, DEFAULT_MODEL, parse_chat_response};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{Span, debug, instrument};
use uuid::Uuid;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI (or compatible) chat-completions client
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    model: String,
    http: HttpTransport,
}

impl OpenAiClient {
    /// Create a client for the public OpenAI endpoint with the default model
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, crate::config::env::DEFAULT_OPENAI_BASE_URL.into(), DEFAULT_MODEL.into())
    }

    /// Create a client against a custom OpenAI-compatible base URL
    pub fn with_endpoint(api_key: String, base_url: String, model: String) -> Self {
        let http = HttpTransport::new(REQUEST_TIMEOUT, CONNECT_TIMEOUT);
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            http,
        }
    }

    /// Build from settings; the API key is mandatory
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(|| ReplyError::ConfigurationMissing("OPENAI_API_KEY is required".into()))?;
        Ok(Self::with_endpoint(
            api_key,
            settings.base_url.clone(),
            settings.model.clone(),
        ))
    }

    /// Replace the HTTP client (used to shorten retries in tests)
    pub fn with_http(mut self, http: HttpTransport) -> Self {
        self.http = http;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmGateway for OpenAiClient {
    #[instrument(skip(self, request), fields(request_id, model = %request.model, message_count = request.messages.len()))]
    async fn chat(&self, request: ChatRequest) -> Result<ChatResult> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        Span::current().record("request_id", request_id.as_str());

        let body = serde_json::to_string(&request)?;
        debug!(request_id = %request_id, "OpenAI request: {}", body);

        let response_body = self
            .http
            .post_json_bearer(&request_id, &self.completions_url(), &self.api_key, body)
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let result = parse_chat_response(&response_body, &request_id, duration_ms)?;

        if let Some(ref usage) = result.usage {
            crate::llm::logging::log_usage(&request_id, "OpenAI", usage);
        }
        crate::llm::logging::log_completion(
            &request_id,
            "OpenAI",
            duration_ms,
            result.content.as_ref().map(|c| c.len()).unwrap_or(0),
            result.finish_reason.as_deref(),
        );

        Ok(result)
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
