//! Shared test fixtures.

use llm_gateway::config::{Config, ProviderConfig, ProviderType};
use llm_gateway::core::dispatcher::Dispatcher;
use llm_gateway::core::registry::ModelRegistry;
use llm_gateway::core::types::{ChatMessage, ChatRequest};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A static-key provider pointed at `base_url`.
pub fn static_key_provider(name: &str, base_url: &str, api_key: &str) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        provider_type: ProviderType::StaticKey,
        base_url: base_url.to_string(),
        api_key: api_key.to_string(),
        model_name: String::new(),
        max_tokens: 4096,
        enabled: true,
        auth_url: String::new(),
        username: String::new(),
        password: String::new(),
        token: String::new(),
        token_ttl_secs: 28800,
    }
}

/// A token-auth provider issuing against `auth_url` as user `u`.
pub fn token_auth_provider(name: &str, base_url: &str, auth_url: &str) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        provider_type: ProviderType::TokenAuth,
        base_url: base_url.to_string(),
        api_key: String::new(),
        model_name: String::new(),
        max_tokens: 4096,
        enabled: true,
        auth_url: auth_url.to_string(),
        username: "u".to_string(),
        password: "p".to_string(),
        token: String::new(),
        token_ttl_secs: 28800,
    }
}

/// Dispatcher over the given providers, all in one category.
pub fn dispatcher_with(providers: Vec<ProviderConfig>) -> Dispatcher {
    let mut config = Config::default();
    config.models.insert("test".to_string(), providers);

    let registry = Arc::new(ModelRegistry::from_config(&config));
    Dispatcher::new(registry).expect("dispatcher")
}

/// One-user-message request.
pub fn chat_request(model: &str, content: &str) -> ChatRequest {
    ChatRequest::new(model, vec![ChatMessage::user(content)])
}

/// Minimal OpenAI-shaped completion body.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    })
}

/// Mount a token endpoint at `/token` answering `{"access_token": token}`
/// and verifying it is called exactly `expected_calls` times.
pub async fn mount_auth_endpoint(server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": token})))
        .expect(expected_calls)
        .mount(server)
        .await;
}
