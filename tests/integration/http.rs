//! Full-stack tests: inbound request through the HTTP layer, dispatch core,
//! and a wiremock-backed upstream.

use crate::common;
use actix_web::{test, web};
use llm_gateway::config::{Config, ProviderConfig};
use llm_gateway::server::HttpServer;
use llm_gateway::server::state::AppState;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_state(providers: Vec<ProviderConfig>) -> web::Data<AppState> {
    let mut config = Config::default();
    config.auth.api_keys.push("sk-test".to_string());
    config.models.insert("test".to_string(), providers);

    web::Data::new(AppState::new(config).unwrap())
}

#[actix_web::test]
async fn chat_relays_the_provider_body_unmodified() {
    let upstream = MockServer::start().await;
    let body = common::completion_body("relayed");
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let state = app_state(vec![common::static_key_provider(
        "gpt-a",
        &upstream.uri(),
        "k1",
    )]);
    let app = test::init_service(HttpServer::create_app(state)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/chat/completions")
            .insert_header(("Authorization", "Bearer sk-test"))
            .set_json(json!({
                "model": "gpt-a",
                "messages": [{"role": "user", "content": "hi"}],
            }))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let received: Value = test::read_body_json(resp).await;
    assert_eq!(received, body);
}

#[actix_web::test]
async fn upstream_rejections_keep_their_status() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&upstream)
        .await;

    let state = app_state(vec![common::static_key_provider(
        "gpt-a",
        &upstream.uri(),
        "k1",
    )]);
    let app = test::init_service(HttpServer::create_app(state)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/chat/completions")
            .insert_header(("Authorization", "Bearer sk-test"))
            .set_json(json!({
                "model": "gpt-a",
                "messages": [{"role": "user", "content": "hi"}],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 429);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "upstream_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("slow down"));
}

#[actix_web::test]
async fn probe_endpoint_reports_instead_of_failing() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&upstream)
        .await;

    let state = app_state(vec![common::static_key_provider(
        "gpt-a",
        &upstream.uri(),
        "k1",
    )]);
    let app = test::init_service(HttpServer::create_app(state)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/models/gpt-a/test")
            .insert_header(("Authorization", "Bearer sk-test"))
            .set_json(json!({"test_message": "ping?"}))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let report: Value = test::read_body_json(resp).await;
    assert_eq!(report["model"], "gpt-a");
    assert_eq!(report["status"], "unavailable");
    assert_eq!(report["test_message"], "ping?");
    assert!(report["error"].as_str().unwrap().contains("500"));
}

#[actix_web::test]
async fn probe_endpoint_reports_availability_with_latency() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::completion_body("pong")))
        .mount(&upstream)
        .await;

    let state = app_state(vec![common::static_key_provider(
        "gpt-a",
        &upstream.uri(),
        "k1",
    )]);
    let app = test::init_service(HttpServer::create_app(state)).await;

    // Body is optional; the default probe message applies.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/v1/models/gpt-a/test")
            .insert_header(("Authorization", "Bearer sk-test"))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let report: Value = test::read_body_json(resp).await;
    assert_eq!(report["status"], "available");
    assert!(report["elapsed_seconds"].as_f64().unwrap() >= 0.0);
    assert_eq!(report["test_message"], "Hello");
    assert_eq!(report["response"]["choices"][0]["message"]["content"], "pong");
}
