//! Adapter for providers authenticated with a configured API key.

use super::{ChatOutcome, ChatProvider, completions_url, post_chat, wire_payload};
use crate::config::ProviderConfig;
use crate::core::types::ChatRequest;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Calls the upstream once with `Authorization: Bearer <api_key>`.
///
/// No retry: a non-200 response is surfaced as-is for the caller to diagnose.
pub struct StaticKeyAdapter {
    http: reqwest::Client,
}

impl StaticKeyAdapter {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatProvider for StaticKeyAdapter {
    async fn complete(&self, provider: &ProviderConfig, request: &ChatRequest) -> Result<Value> {
        let url = completions_url(provider);
        let payload = wire_payload(provider, request);

        match post_chat(&self.http, &url, &provider.api_key, &payload).await? {
            ChatOutcome::Success(body) => Ok(body),
            ChatOutcome::Rejected { status, body } => {
                warn!(provider = %provider.name, status, "Provider rejected chat call");
                Err(GatewayError::Upstream { status, body })
            }
        }
    }
}
