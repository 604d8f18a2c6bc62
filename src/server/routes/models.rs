//! Model listing, inspection, and probing.

use crate::core::types::{ModelInfo, ModelList};
use crate::server::auth::ApiKey;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;

/// Optional body for the probe endpoint.
#[derive(Debug, Deserialize)]
pub struct TestModelBody {
    pub test_message: Option<String>,
}

/// `GET /v1/models` — enabled models in the OpenAI list shape.
pub async fn list_models(state: web::Data<AppState>, _key: ApiKey) -> HttpResponse {
    let data = state
        .registry
        .list_enabled()
        .iter()
        .map(ModelInfo::from_provider)
        .collect();

    HttpResponse::Ok().json(ModelList::new(data))
}

/// `GET /v1/models/{name}` — 404 when absent or disabled.
pub async fn get_model(
    state: web::Data<AppState>,
    _key: ApiKey,
    name: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    let provider = state.registry.find_by_name(name.as_str())?;
    Ok(HttpResponse::Ok().json(ModelInfo::from_provider(provider)))
}

/// `POST /v1/models/{name}/test` — probe availability.
///
/// Probe failures come back as a structured `unavailable` report with a 200,
/// not an error status.
pub async fn test_model(
    state: web::Data<AppState>,
    _key: ApiKey,
    name: web::Path<String>,
    body: Option<web::Json<TestModelBody>>,
) -> HttpResponse {
    let probe = body.and_then(|b| b.into_inner().test_message);
    info!(model = %name, "Model probe requested");

    let report = state.dispatcher.test(name.as_str(), probe).await;
    HttpResponse::Ok().json(report)
}
