//! Adapter for providers that exchange username/password for bearer tokens.

use super::{ChatOutcome, ChatProvider, completions_url, post_chat, wire_payload};
use crate::config::ProviderConfig;
use crate::core::credentials::TokenManager;
use crate::core::types::ChatRequest;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Retry position of the call in flight.
///
/// A 401 on the first attempt invalidates the cached token and earns exactly
/// one retry with a freshly resolved credential; any 401 after that is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryState {
    First,
    Refreshed,
}

pub struct TokenAuthAdapter {
    http: reqwest::Client,
    tokens: Arc<TokenManager>,
}

impl TokenAuthAdapter {
    pub fn new(http: reqwest::Client, tokens: Arc<TokenManager>) -> Self {
        Self { http, tokens }
    }
}

#[async_trait]
impl ChatProvider for TokenAuthAdapter {
    async fn complete(&self, provider: &ProviderConfig, request: &ChatRequest) -> Result<Value> {
        let url = completions_url(provider);
        let payload = wire_payload(provider, request);

        let mut credential = self.tokens.resolve(provider).await?;
        let mut state = RetryState::First;

        loop {
            match post_chat(&self.http, &url, &credential, &payload).await? {
                ChatOutcome::Success(body) => return Ok(body),
                ChatOutcome::Rejected { status: 401, .. } if state == RetryState::First => {
                    info!(provider = %provider.name, "Token rejected, refreshing and retrying once");
                    self.tokens.invalidate(&provider.name, &provider.username);
                    credential = self.tokens.resolve(provider).await?;
                    state = RetryState::Refreshed;
                }
                ChatOutcome::Rejected { status, body } => {
                    warn!(provider = %provider.name, status, "Provider rejected chat call");
                    return Err(GatewayError::Upstream { status, body });
                }
            }
        }
    }
}
