//! Provider adapters.
//!
//! One adapter per upstream authentication scheme, behind a common trait.
//! Adapters translate the generic [`ChatRequest`] into the provider's wire
//! payload and normalize call behavior; successful bodies are relayed
//! unmodified.

mod static_key;
mod token_auth;

pub use static_key::StaticKeyAdapter;
pub use token_auth::TokenAuthAdapter;

use crate::config::ProviderConfig;
use crate::core::types::ChatRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

/// Outbound chat call timeout.
const CHAT_TIMEOUT: Duration = Duration::from_secs(60);

/// A chat-capable upstream, invoked with an already-resolved provider config.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Forward `request` to `provider` and return its JSON body unmodified.
    async fn complete(&self, provider: &ProviderConfig, request: &ChatRequest) -> Result<Value>;
}

/// Build the outbound chat client shared by the adapters.
pub(crate) fn chat_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(CHAT_TIMEOUT).build()?)
}

fn completions_url(provider: &ProviderConfig) -> String {
    format!("{}/chat/completions", provider.base_url.trim_end_matches('/'))
}

/// Map the generic request onto the provider's wire schema.
///
/// The wire model id and the token ceiling come from the provider config
/// when the request leaves them open; sampling parameters pass through.
fn wire_payload(provider: &ProviderConfig, request: &ChatRequest) -> Value {
    json!({
        "model": provider.wire_model(),
        "messages": request.messages,
        "max_tokens": request.max_tokens.unwrap_or(provider.max_tokens),
        "temperature": request.temperature,
        "top_p": request.top_p,
        "stream": request.stream,
    })
}

/// Outcome of a single outbound chat call.
enum ChatOutcome {
    Success(Value),
    Rejected { status: u16, body: String },
}

/// Issue one bearer-authenticated POST and split the outcome by status.
async fn post_chat(
    http: &reqwest::Client,
    url: &str,
    bearer: &str,
    payload: &Value,
) -> Result<ChatOutcome> {
    let response = http.post(url).bearer_auth(bearer).json(payload).send().await?;

    let status = response.status().as_u16();
    if status == 200 {
        Ok(ChatOutcome::Success(response.json().await?))
    } else {
        Ok(ChatOutcome::Rejected {
            status,
            body: response.text().await.unwrap_or_default(),
        })
    }
}
