//! Request dispatch: model lookup, adapter selection, invocation.

use crate::config::ProviderType;
use crate::core::credentials::TokenManager;
use crate::core::providers::{ChatProvider, StaticKeyAdapter, TokenAuthAdapter, chat_client};
use crate::core::registry::ModelRegistry;
use crate::core::types::{ChatMessage, ChatRequest, ModelTestReport, ProbeStatus};
use crate::utils::error::{GatewayError, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Probe request defaults.
const PROBE_MESSAGE: &str = "Hello";
const PROBE_MAX_TOKENS: u32 = 50;

/// Routes each chat request to the adapter matching its provider's
/// authentication scheme.
pub struct Dispatcher {
    registry: Arc<ModelRegistry>,
    static_key: StaticKeyAdapter,
    token_auth: TokenAuthAdapter,
}

impl Dispatcher {
    pub fn new(registry: Arc<ModelRegistry>) -> Result<Self> {
        let http = chat_client()?;
        let tokens = Arc::new(TokenManager::new()?);

        Ok(Self {
            registry,
            static_key: StaticKeyAdapter::new(http.clone()),
            token_auth: TokenAuthAdapter::new(http, tokens),
        })
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Forward a chat request to the provider its model name resolves to.
    ///
    /// Fails with `ModelNotFound` for unknown or disabled names,
    /// `UnsupportedProviderType` when the configuration names a scheme with
    /// no adapter, and otherwise propagates the adapter's result unchanged.
    pub async fn complete(&self, request: &ChatRequest) -> Result<Value> {
        let provider = self.registry.find_by_name(&request.model)?;

        let adapter: &dyn ChatProvider = match &provider.provider_type {
            ProviderType::StaticKey => &self.static_key,
            ProviderType::TokenAuth => &self.token_auth,
            ProviderType::Other(tag) => {
                return Err(GatewayError::UnsupportedProviderType(tag.clone()));
            }
        };

        info!(model = %request.model, scheme = %provider.provider_type, "Dispatching chat request");
        adapter.complete(provider, request).await
    }

    /// Probe a model with a minimal request and report availability.
    ///
    /// Total over the error taxonomy: every failure becomes an `unavailable`
    /// report, never an `Err`.
    pub async fn test(&self, model: &str, probe_message: Option<String>) -> ModelTestReport {
        let test_message = probe_message.unwrap_or_else(|| PROBE_MESSAGE.to_string());
        let request = ChatRequest {
            max_tokens: Some(PROBE_MAX_TOKENS),
            ..ChatRequest::new(model, vec![ChatMessage::user(test_message.clone())])
        };

        let started = Instant::now();
        match self.complete(&request).await {
            Ok(response) => ModelTestReport {
                model: model.to_string(),
                status: ProbeStatus::Available,
                elapsed_seconds: Some(round_hundredths(started.elapsed().as_secs_f64())),
                test_message,
                response: Some(response),
                error: None,
            },
            Err(e) => {
                error!(model, error = %e, "Model probe failed");
                ModelTestReport {
                    model: model.to_string(),
                    status: ProbeStatus::Unavailable,
                    elapsed_seconds: None,
                    test_message,
                    response: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn round_hundredths(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}
