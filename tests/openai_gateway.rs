// tests/openai_gateway.rs
// OpenAiClient against a mock chat-completions endpoint

mod common;

use alva_reply::ReplyError;
use alva_reply::llm::{HttpTransport, LlmGateway, Message};
use common::{TEST_API_KEY, completion_body, openai_client};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_complete_sends_standard_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .and(body_partial_json(json!({
            "model": "gpt-4.1-mini",
            "max_tokens": 250,
            "temperature": 0.0,
            "messages": [
                {"role": "system", "content": "classify"},
                {"role": "user", "content": "$ETH flipping resistance"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(Some("  {\"decision\":\"reply\"}\n"))))
        .expect(1)
        .mount(&server)
        .await;

    let client = openai_client(&server);
    let content = client
        .complete(
            vec![Message::system("classify"), Message::user("$ETH flipping resistance")],
            250,
            Some(0.0),
        )
        .await
        .unwrap();

    assert_eq!(content, "{\"decision\":\"reply\"}");
}

#[tokio::test]
async fn test_chat_reports_usage_and_finish_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(Some("gm"))))
        .mount(&server)
        .await;

    let client = openai_client(&server);
    let request = alva_reply::llm::ChatRequest::new(client.model_name(), vec![Message::user("hi")]);
    let result = client.chat(request).await.unwrap();

    assert_eq!(result.content.as_deref(), Some("gm"));
    assert_eq!(result.finish_reason.as_deref(), Some("stop"));
    assert_eq!(result.usage.unwrap().total_tokens, 160);
    assert!(!result.request_id.is_empty());
}

#[tokio::test]
async fn test_temperature_omitted_when_unset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(Some("ok"))))
        .mount(&server)
        .await;

    let client = openai_client(&server);
    client
        .complete(vec![Message::user("hi")], 280, None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["max_tokens"], 280);
    assert!(body.get("temperature").is_none());
}

#[tokio::test]
async fn test_null_content_is_empty_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(None)))
        .mount(&server)
        .await;

    let err = openai_client(&server)
        .complete(vec![Message::user("hi")], 100, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ReplyError::EmptyCompletion));
}

#[tokio::test]
async fn test_no_choices_is_empty_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = openai_client(&server)
        .complete(vec![Message::user("hi")], 100, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ReplyError::EmptyCompletion));
}

#[tokio::test]
async fn test_client_error_is_upstream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = openai_client(&server)
        .complete(vec![Message::user("hi")], 100, None)
        .await
        .unwrap_err();
    assert!(err.is_upstream());
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_server_error_retried_then_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(3)
        .mount(&server)
        .await;

    let client = openai_client(&server).with_http(
        HttpTransport::new(Duration::from_secs(5), Duration::from_secs(2))
            .with_base_backoff(Duration::from_millis(5)),
    );
    let err = client
        .complete(vec![Message::user("hi")], 100, None)
        .await
        .unwrap_err();
    assert!(err.is_upstream());
    assert!(err.to_string().contains("overloaded"));
}

#[tokio::test]
async fn test_garbage_body_is_upstream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = openai_client(&server)
        .complete(vec![Message::user("hi")], 100, None)
        .await
        .unwrap_err();
    assert!(err.is_upstream());
}
