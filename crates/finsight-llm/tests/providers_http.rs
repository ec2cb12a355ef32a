//! Offline HTTP-level tests for both provider flavors
//!
//! Every upstream behavior is mocked; no test touches the network. The
//! interesting cases are the two 200 envelope shapes, the status-specific
//! error mapping, a malformed 200, and a timeout.

use finsight_llm::{
    ApiKind, ChatCompletionsProvider, ChatRequest, LlmConfig, LlmError, LlmProvider,
    ResponsesProvider, from_config,
};
use httpmock::{Method::POST, MockServer};
use serde_json::json;
use std::time::Duration;

fn test_config(server: &MockServer) -> LlmConfig {
    LlmConfig::new("sk-test")
        .with_api_base(server.base_url())
        .with_timeout(2)
}

#[tokio::test]
async fn chat_provider_extracts_message_content() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .header("authorization", "Bearer sk-test");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"choices": [{"message": {"content": "X"}}]}));
    });

    let provider = ChatCompletionsProvider::with_config(test_config(&server)).expect("builds");
    let text = provider
        .complete(ChatRequest::new("prompt").with_system("persona"))
        .await
        .expect("completes");

    mock.assert();
    assert_eq!(text, "X");
}

#[tokio::test]
async fn responses_provider_extracts_output_text() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/responses")
            .header("authorization", "Bearer sk-test");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"output": [{"content": [{"text": "Y"}]}]}));
    });

    let provider = ResponsesProvider::with_config(test_config(&server)).expect("builds");
    let text = provider
        .complete(ChatRequest::new("prompt"))
        .await
        .expect("completes");

    mock.assert();
    assert_eq!(text, "Y");
}

#[tokio::test]
async fn responses_provider_skips_items_without_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/responses");
        then.status(200).json_body(json!({
            "output": [
                {"type": "reasoning"},
                {"content": [{"type": "refusal"}, {"text": "the answer"}]}
            ]
        }));
    });

    let provider = ResponsesProvider::with_config(test_config(&server)).expect("builds");
    let text = provider
        .complete(ChatRequest::new("prompt"))
        .await
        .expect("completes");
    assert_eq!(text, "the answer");
}

#[tokio::test]
async fn chat_provider_sends_model_and_messages() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .json_body_includes(
                r#"{"model": "qwen-plus", "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "prompt"}
                ]}"#,
            );
        then.status(200)
            .json_body(json!({"choices": [{"message": {"content": "ok"}}]}));
    });

    let provider = ChatCompletionsProvider::with_config(test_config(&server)).expect("builds");
    provider
        .complete(ChatRequest::new("prompt").with_system("persona"))
        .await
        .expect("completes");

    mock.assert();
}

#[tokio::test]
async fn http_401_maps_to_credential_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(401).body(r#"{"error": "invalid api key"}"#);
    });

    let provider = ChatCompletionsProvider::with_config(test_config(&server)).expect("builds");
    let err = provider
        .complete(ChatRequest::new("prompt"))
        .await
        .expect_err("401 must fail");

    assert!(matches!(err, LlmError::CredentialRejected));
    // The user-facing message names the credential as the likely cause.
    let message = err.to_string();
    assert!(message.contains("Authentication"));
    assert!(message.contains("API key"));
}

#[tokio::test]
async fn http_404_maps_to_endpoint_mismatch_naming_the_model() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/responses");
        then.status(404).body("not found");
    });

    let config = test_config(&server)
        .with_api_kind(ApiKind::Responses)
        .with_model("qwen-plus")
        .with_project("proj-7");
    let provider = ResponsesProvider::with_config(config).expect("builds");
    let err = provider
        .complete(ChatRequest::new("prompt"))
        .await
        .expect_err("404 must fail");

    assert!(matches!(err, LlmError::EndpointMismatch { .. }));
    let message = err.to_string();
    assert!(message.contains("qwen-plus"));
    assert!(message.contains("proj-7"));
}

#[tokio::test]
async fn other_non_200_carries_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(503).body("upstream overloaded");
    });

    let provider = ChatCompletionsProvider::with_config(test_config(&server)).expect("builds");
    let err = provider
        .complete(ChatRequest::new("prompt"))
        .await
        .expect_err("503 must fail");

    match err {
        LlmError::Upstream { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream overloaded");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_200_reports_raw_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).body(r#"{"surprise": "no choices here"}"#);
    });

    let provider = ChatCompletionsProvider::with_config(test_config(&server)).expect("builds");
    let err = provider
        .complete(ChatRequest::new("prompt"))
        .await
        .expect_err("extraction must fail");

    assert!(matches!(err, LlmError::MalformedResponse { .. }));
    assert!(err.to_string().contains("no choices here"));
}

#[tokio::test]
async fn slow_upstream_maps_to_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(json!({"choices": [{"message": {"content": "too late"}}]}));
    });

    let config = test_config(&server).with_timeout(1);
    let provider = ChatCompletionsProvider::with_config(config).expect("builds");
    let err = provider
        .complete(ChatRequest::new("prompt"))
        .await
        .expect_err("must time out");

    assert!(matches!(err, LlmError::Timeout(1)));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn factory_builds_the_configured_flavor() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/responses");
        then.status(200)
            .json_body(json!({"output": [{"content": [{"text": "via factory"}]}]}));
    });

    let config = test_config(&server).with_api_kind(ApiKind::Responses);
    let provider = from_config(config).expect("builds");
    let text = provider
        .complete(ChatRequest::new("prompt"))
        .await
        .expect("completes");
    assert_eq!(text, "via factory");
}
