//! OpenAI-compatible chat endpoint.

use crate::core::types::ChatRequest;
use crate::server::auth::ApiKey;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use tracing::info;

/// `POST /v1/chat/completions` — forward to the resolved provider and relay
/// its JSON body unmodified.
pub async fn chat_completions(
    state: web::Data<AppState>,
    _key: ApiKey,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, GatewayError> {
    info!(model = %request.model, messages = request.messages.len(), "Chat request received");

    let body = state.dispatcher.complete(&request).await?;
    Ok(HttpResponse::Ok().json(body))
}
