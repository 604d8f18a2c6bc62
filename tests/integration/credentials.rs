//! Credential resolution: caching, TTL, invalidation, single-flight, and
//! failure causes.

use crate::common;
use llm_gateway::CredentialError;
use llm_gateway::config::ProviderConfig;
use llm_gateway::core::credentials::TokenManager;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_provider(server: &MockServer) -> ProviderConfig {
    common::token_auth_provider(
        "svc-b",
        "http://unused.invalid",
        &format!("{}/token", server.uri()),
    )
}

#[tokio::test]
async fn cached_token_is_reused_within_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_json(json!({"username": "u", "password": "p"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let manager = TokenManager::new().unwrap();
    let provider = auth_provider(&server);

    let first = manager.resolve(&provider).await.unwrap();
    let second = manager.resolve(&provider).await.unwrap();

    assert_eq!(first, "tok-1");
    assert_eq!(first, second);
}

#[tokio::test]
async fn pre_supplied_token_bypasses_issuance() {
    let server = MockServer::start().await;
    common::mount_auth_endpoint(&server, "never-issued", 0).await;

    let mut provider = auth_provider(&server);
    provider.token = "configured-token".to_string();

    let manager = TokenManager::new().unwrap();
    assert_eq!(
        manager.resolve(&provider).await.unwrap(),
        "configured-token"
    );
}

#[tokio::test]
async fn invalidate_forces_fresh_issuance() {
    let server = MockServer::start().await;
    common::mount_auth_endpoint(&server, "tok", 2).await;

    let manager = TokenManager::new().unwrap();
    let provider = auth_provider(&server);

    manager.resolve(&provider).await.unwrap();
    manager.invalidate(&provider.name, &provider.username);
    manager.resolve(&provider).await.unwrap();

    // Invalidating an absent entry is a no-op.
    manager.invalidate(&provider.name, &provider.username);
    manager.invalidate(&provider.name, &provider.username);
}

#[tokio::test]
async fn expired_token_is_reissued() {
    let server = MockServer::start().await;
    common::mount_auth_endpoint(&server, "tok", 2).await;

    let manager = TokenManager::new().unwrap();
    let mut provider = auth_provider(&server);
    provider.token_ttl_secs = 1;

    manager.resolve(&provider).await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    manager.resolve(&provider).await.unwrap();
}

#[tokio::test]
async fn concurrent_resolutions_share_one_issuance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-sf"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let manager = Arc::new(TokenManager::new().unwrap());
    let provider = Arc::new(auth_provider(&server));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = manager.clone();
            let provider = provider.clone();
            tokio::spawn(async move { manager.resolve(&provider).await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "tok-sf");
    }
}

#[tokio::test]
async fn rejected_issuance_reports_protocol_cause() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .mount(&server)
        .await;

    let manager = TokenManager::new().unwrap();
    let err = manager.resolve(&auth_provider(&server)).await.unwrap_err();

    match err {
        CredentialError::Rejected {
            status, ref body, ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(body, "denied");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_access_token_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .mount(&server)
        .await;

    let manager = TokenManager::new().unwrap();
    let err = manager.resolve(&auth_provider(&server)).await.unwrap_err();

    assert!(matches!(err, CredentialError::MalformedResponse { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_reports_network_cause() {
    let provider = common::token_auth_provider(
        "svc-b",
        "http://unused.invalid",
        "http://127.0.0.1:1/token",
    );

    let manager = TokenManager::new().unwrap();
    let err = manager.resolve(&provider).await.unwrap_err();

    assert!(matches!(err, CredentialError::Network { .. }));
}
