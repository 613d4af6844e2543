//! Remote responder against a mock completions endpoint.

use folio_core::{AnswerSource, KnowledgeBase, LlmConfig, PatternResponder, Responder, Topic};
use folio_skills::{select_responder, ModelRouter, RemoteError};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUESTION: &str = "what are your skills";

fn live_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        api_url: format!("{}/v1/chat/completions", server.uri()),
        api_key: Some("sk-test".to_string()),
        timeout_secs: 2,
        ..LlmConfig::default()
    }
}

fn local_answer(utterance: &str) -> String {
    PatternResponder::new(Arc::new(KnowledgeBase::builtin()))
        .unwrap()
        .answer(utterance)
        .text
}

#[tokio::test]
async fn remote_completion_is_used_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "max_tokens": 250
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "  I mostly write Python.  "}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let responder = select_responder(&live_config(&server), Arc::new(KnowledgeBase::builtin())).unwrap();
    let answer = responder.respond(QUESTION).await;
    assert_eq!(answer.source, AnswerSource::Remote);
    assert_eq!(answer.text, "I mostly write Python.");
}

#[tokio::test]
async fn server_error_falls_back_to_pattern_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "upstream exploded"}
        })))
        .mount(&server)
        .await;

    let responder = select_responder(&live_config(&server), Arc::new(KnowledgeBase::builtin())).unwrap();
    let answer = responder.respond(QUESTION).await;
    assert_eq!(answer.source, AnswerSource::Pattern(Topic::Skills));
    assert_eq!(answer.text, local_answer(QUESTION));
}

#[tokio::test]
async fn status_error_carries_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;

    let router = ModelRouter::from_config(live_config(&server)).unwrap();
    match router.generate("sys", "hi").await {
        Err(RemoteError::Status { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_payload_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let router = ModelRouter::from_config(live_config(&server)).unwrap();
    assert!(matches!(
        router.generate("sys", "hi").await,
        Err(RemoteError::MalformedPayload(_))
    ));

    let responder = select_responder(&live_config(&server), Arc::new(KnowledgeBase::builtin())).unwrap();
    assert_eq!(responder.get_response(QUESTION).await, local_answer(QUESTION));
}

#[tokio::test]
async fn empty_completion_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "   "}}]
        })))
        .mount(&server)
        .await;

    let router = ModelRouter::from_config(live_config(&server)).unwrap();
    assert!(matches!(
        router.generate("sys", "hi").await,
        Err(RemoteError::EmptyCompletion)
    ));
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    let server = MockServer::start().await;
    let config = live_config(&server);
    drop(server);

    let responder = select_responder(&config, Arc::new(KnowledgeBase::builtin())).unwrap();
    let answer = responder.respond(QUESTION).await;
    assert_eq!(answer.source, AnswerSource::Pattern(Topic::Skills));
    assert_eq!(answer.text, local_answer(QUESTION));
}

#[tokio::test]
async fn slow_provider_times_out_and_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_secs(5))
                .set_body_json(json!({"choices": [{"message": {"content": "late"}}]})),
        )
        .mount(&server)
        .await;

    let config = LlmConfig {
        timeout_secs: 1,
        ..live_config(&server)
    };
    let router = ModelRouter::from_config(config.clone()).unwrap();
    assert!(matches!(
        router.generate("sys", "hi").await,
        Err(RemoteError::Timeout(1))
    ));

    let responder = select_responder(&config, Arc::new(KnowledgeBase::builtin())).unwrap();
    assert_eq!(responder.get_response(QUESTION).await, local_answer(QUESTION));
}
