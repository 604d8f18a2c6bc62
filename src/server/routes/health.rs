//! Health and service-info endpoints.

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    models_count: usize,
    models_status: BTreeMap<String, bool>,
}

/// `GET /v1/health` — public liveness report over the enabled model set.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let models_status = state
        .registry
        .list_enabled()
        .iter()
        .map(|p| (p.name.clone(), p.enabled))
        .collect();

    HttpResponse::Ok().json(HealthReport {
        status: "healthy",
        timestamp: chrono::Utc::now(),
        models_count: state.registry.len(),
        models_status,
    })
}

/// `GET /` — service banner.
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "LLM Gateway",
        "version": crate::VERSION,
        "health": "/v1/health",
    }))
}
