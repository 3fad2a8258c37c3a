#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for hrbot-agent: the OpenAI-compatible backend against a
//! mock server and every path of `ResponseGenerator::generate`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hrbot_agent::recommend::FOLLOW_UP;
use hrbot_agent::{
    LlmBackend, LlmClient, ModelConfig, Recommendation, RecommendationSource, ResponseGenerator,
};
use hrbot_core::{Employee, HrError, HrResult, Message};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn employees() -> Vec<Employee> {
    vec![
        Employee {
            id: 1,
            name: "Alice Johnson".to_string(),
            skills: vec!["Python".to_string(), "Django".to_string()],
            experience_years: 5,
            projects: vec!["Patient Portal".to_string()],
            availability: "available".to_string(),
        },
        Employee {
            id: 4,
            name: "David Kim".to_string(),
            skills: vec!["Python".to_string(), "TensorFlow".to_string()],
            experience_years: 6,
            projects: vec!["Fraud Detection".to_string()],
            availability: "unavailable".to_string(),
        },
    ]
}

fn model_config(server: &MockServer, key: &str) -> ModelConfig {
    ModelConfig {
        model_id: "gpt-test".to_string(),
        api_key: key.to_string(),
        api_base_url: Some(server.uri()),
        ..ModelConfig::default()
    }
}

fn generator(config: ModelConfig, timeout: Duration) -> ResponseGenerator {
    ResponseGenerator::new(LlmClient::new(config).unwrap(), timeout)
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn assert_is_template(rec: &Recommendation) {
    let text = rec.text();
    assert!(text.starts_with("Based on your query 'Python developers', here are the top matches:"));
    for e in employees() {
        assert!(text.contains(&e.name), "missing {}", e.name);
        assert!(
            text.contains(&format!("Availability: {}", e.availability)),
            "missing availability for {}",
            e.name
        );
    }
    assert!(text.ends_with(FOLLOW_UP));
}

// ---------------------------------------------------------------------------
// 1. Model path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn model_reply_is_returned_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-test",
            "max_tokens": 250,
            "messages": [{"role": "system", "content": "You are an expert HR assistant."}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "\n  I recommend Alice Johnson for this role.  \n",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let rec = generator(model_config(&server, "sk-test"), Duration::from_secs(5))
        .generate("Python developers", &employees())
        .await;

    assert_eq!(
        rec,
        Recommendation::Generated {
            text: "I recommend Alice Johnson for this role.".to_string()
        }
    );
    assert_eq!(rec.source(), RecommendationSource::Model);
}

#[tokio::test]
async fn prompt_carries_query_and_every_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&server)
        .await;

    generator(model_config(&server, "sk-test"), Duration::from_secs(5))
        .generate("Python developers", &employees())
        .await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let temperature = body["temperature"].as_f64().unwrap();
    assert!(temperature > 0.0);
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("\"Python developers\""));
    assert!(user.contains("- Alice Johnson (5 yrs) | Skills: Python, Django"));
    assert!(user.contains("- David Kim (6 yrs)"));
}

// ---------------------------------------------------------------------------
// 2. Fallback path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_falls_back_to_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rec = generator(model_config(&server, "sk-test"), Duration::from_secs(5))
        .generate("Python developers", &employees())
        .await;

    assert!(rec.is_fallback());
    assert_is_template(&rec);
    match rec {
        Recommendation::Fallback { reason, .. } => assert!(reason.contains("500")),
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})))
        .mount(&server)
        .await;

    let rec = generator(model_config(&server, "sk-test"), Duration::from_secs(5))
        .generate("Python developers", &employees())
        .await;

    assert_eq!(rec.source(), RecommendationSource::Fallback);
    assert_is_template(&rec);
}

#[tokio::test]
async fn slow_model_times_out_into_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("too late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let rec = generator(model_config(&server, "sk-test"), Duration::from_millis(200))
        .generate("Python developers", &employees())
        .await;

    match &rec {
        Recommendation::Fallback { reason, .. } => assert!(reason.contains("timed out")),
        other => panic!("expected fallback, got {other:?}"),
    }
    assert_is_template(&rec);
}

#[tokio::test]
async fn missing_api_key_falls_back_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let rec = generator(model_config(&server, ""), Duration::from_secs(5))
        .generate("Python developers", &employees())
        .await;

    assert!(rec.is_fallback());
    assert_is_template(&rec);
}

// ---------------------------------------------------------------------------
// 3. No matches and call counting
// ---------------------------------------------------------------------------

struct CountingBackend {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl LlmBackend for CountingBackend {
    async fn chat(&self, _system_prompt: Option<&str>, _messages: &[Message]) -> HrResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(HrError::Http("connection refused".to_string()))
        } else {
            Ok("generated".to_string())
        }
    }
}

fn counting_generator(fail: bool) -> (ResponseGenerator, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let backend = CountingBackend {
        calls: calls.clone(),
        fail,
    };
    let subject = ResponseGenerator::new(
        LlmClient::from_backend(Box::new(backend)),
        Duration::from_secs(5),
    );
    (subject, calls)
}

#[tokio::test]
async fn empty_matches_make_no_outbound_call() {
    let (subject, calls) = counting_generator(false);
    let rec = subject.generate("Find Rust wizards", &[]).await;

    assert_eq!(
        rec,
        Recommendation::NoMatches {
            text: "No suitable employees found for query: 'Find Rust wizards'.".to_string()
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failure_is_not_retried() {
    let (subject, calls) = counting_generator(true);
    let rec = subject.generate("Python developers", &employees()).await;

    assert!(rec.is_fallback());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn custom_backend_success() {
    let (subject, calls) = counting_generator(false);
    let rec = subject.generate("Python developers", &employees()).await;

    assert_eq!(rec.into_text(), "generated");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
