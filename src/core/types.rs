//! Wire-level request and response types.

use crate::config::ProviderConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One turn of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `user`, `assistant`, or `system`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Generic chat-completion request, forwarded verbatim to whichever provider
/// the `model` name resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,

    /// When absent, the provider's configured ceiling applies.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Forwarded as-is; the gateway never interprets it.
    #[serde(default)]
    pub stream: bool,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    1.0
}

impl ChatRequest {
    /// A request with the wire defaults for everything but model and messages.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: default_temperature(),
            top_p: default_top_p(),
            stream: false,
        }
    }
}

/// Model metadata exposed by the listing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub owned_by: &'static str,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub max_tokens: u32,
    pub enabled: bool,
}

impl ModelInfo {
    pub fn from_provider(provider: &ProviderConfig) -> Self {
        Self {
            id: provider.name.clone(),
            object: "model",
            created: Utc::now().timestamp(),
            owned_by: "llm-gateway",
            provider_type: provider.provider_type.to_string(),
            max_tokens: provider.max_tokens,
            enabled: provider.enabled,
        }
    }
}

/// OpenAI-style model listing envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<ModelInfo>,
}

impl ModelList {
    pub fn new(data: Vec<ModelInfo>) -> Self {
        Self {
            object: "list",
            data,
        }
    }
}

/// Outcome of a model availability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Available,
    Unavailable,
}

/// Report returned by the dispatcher's probe entry point.
#[derive(Debug, Clone, Serialize)]
pub struct ModelTestReport {
    pub model: String,
    pub status: ProbeStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,

    pub test_message: String,

    /// The provider's body, relayed for inspection on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
