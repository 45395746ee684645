// tests/common/mod.rs
// Shared wiremock helpers for the integration suites

#![allow(dead_code)]

use alva_reply::alva::AlvaClient;
use alva_reply::config::AlvaSettings;
use alva_reply::llm::{HttpTransport, OpenAiClient};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-test";
pub const TEST_JWT: &str = "jwt-test-token";

/// Chat-completions body with a single choice
pub fn completion_body(content: Option<&str>) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
    })
}

/// Gateway pointed at the mock server, with retries disabled
pub fn openai_client(server: &MockServer) -> OpenAiClient {
    OpenAiClient::with_endpoint(
        TEST_API_KEY.to_string(),
        format!("{}/v1", server.uri()),
        "gpt-4.1-mini".to_string(),
    )
    .with_http(
        HttpTransport::new(Duration::from_secs(5), Duration::from_secs(2)).with_retries(0),
    )
}

pub fn alva_client(server: &MockServer) -> AlvaClient {
    let settings = AlvaSettings {
        jwt_token: Some(TEST_JWT.to_string()),
        api_base_url: server.uri(),
        skill_id: "1940947595121053696".to_string(),
    };
    AlvaClient::new(&settings).unwrap()
}

/// NDJSON body framing `fragments` inside the generation window
pub fn ndjson(fragments: &[&str]) -> String {
    let mut lines = vec![
        json!({"session_id": "s-1", "session_name": "ask"}).to_string(),
        json!({"msg": "<GENERATING>"}).to_string(),
    ];
    for fragment in fragments {
        lines.push(json!({"msg": fragment, "answer_id": "a-1"}).to_string());
    }
    lines.push(json!({"msg": "</GENERATING>"}).to_string());
    lines.join("\n")
}
