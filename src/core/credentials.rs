//! Bearer-token acquisition and caching for token-auth providers.

use crate::config::ProviderConfig;
use crate::utils::error::{CredentialError, GatewayError};
use dashmap::DashMap;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Token issuance timeout.
const ISSUE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Resolves usable credentials for token-auth providers.
///
/// Issued tokens are cached per `provider:username` pair until their TTL
/// lapses. Concurrent cold-start resolutions for the same pair collapse into
/// a single issuance call: each key has a gate mutex, and whoever loses the
/// race finds the winner's token in the cache on re-check. Nothing survives a
/// restart.
pub struct TokenManager {
    http: reqwest::Client,
    tokens: DashMap<String, CachedToken>,
    gates: DashMap<String, Arc<Mutex<()>>>,
}

fn cache_key(provider_name: &str, username: &str) -> String {
    format!("{}:{}", provider_name, username)
}

impl TokenManager {
    pub fn new() -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(ISSUE_TIMEOUT).build()?;
        Ok(Self {
            http,
            tokens: DashMap::new(),
            gates: DashMap::new(),
        })
    }

    /// Resolve a usable bearer token for `provider`.
    ///
    /// A pre-supplied static token wins outright, with no caching and no
    /// network call. Otherwise the cache is consulted and the issuance
    /// endpoint is hit only on a miss or an expired entry.
    pub async fn resolve(&self, provider: &ProviderConfig) -> Result<String, CredentialError> {
        if !provider.token.is_empty() {
            debug!(provider = %provider.name, "Using pre-supplied token");
            return Ok(provider.token.clone());
        }

        let key = cache_key(&provider.name, &provider.username);
        if let Some(entry) = self.tokens.get(&key) {
            if entry.is_fresh() {
                debug!(provider = %provider.name, "Using cached token");
                return Ok(entry.token.clone());
            }
        }

        let gate = self.gates.entry(key.clone()).or_default().clone();
        let _issuing = gate.lock().await;

        // Re-check under the gate: a concurrent caller may have refilled the
        // cache while this one waited.
        if let Some(entry) = self.tokens.get(&key) {
            if entry.is_fresh() {
                return Ok(entry.token.clone());
            }
        }

        let token = self.issue(provider).await?;
        self.tokens.insert(
            key,
            CachedToken {
                token: token.clone(),
                expires_at: Instant::now() + provider.token_ttl(),
            },
        );
        info!(provider = %provider.name, "Issued new token");
        Ok(token)
    }

    /// Drop the cached token for a provider/account pair.
    ///
    /// Idempotent; the next [`resolve`](Self::resolve) for the pair issues
    /// afresh. Called after an authenticated chat call comes back 401.
    pub fn invalidate(&self, provider_name: &str, username: &str) {
        let key = cache_key(provider_name, username);
        if self.tokens.remove(&key).is_some() {
            info!(provider = provider_name, "Invalidated cached token");
        }
    }

    async fn issue(&self, provider: &ProviderConfig) -> Result<String, CredentialError> {
        debug!(provider = %provider.name, auth_url = %provider.auth_url, "Requesting token");

        let response = self
            .http
            .post(&provider.auth_url)
            .json(&json!({
                "username": provider.username,
                "password": provider.password,
            }))
            .send()
            .await
            .map_err(|source| CredentialError::Network {
                provider: provider.name.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(provider = %provider.name, status, "Token issuance rejected");
            return Err(CredentialError::Rejected {
                provider: provider.name.clone(),
                status,
                body,
            });
        }

        let payload: Value =
            response
                .json()
                .await
                .map_err(|_| CredentialError::MalformedResponse {
                    provider: provider.name.clone(),
                })?;

        match payload.get("access_token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(CredentialError::MalformedResponse {
                provider: provider.name.clone(),
            }),
        }
    }
}
