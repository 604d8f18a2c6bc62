//! HTTP route handlers.

pub mod chat;
pub mod health;
pub mod models;

use actix_web::web;

/// Register all routes.
///
/// `/` and `/v1/health` are public; everything else under `/v1` requires a
/// valid inbound API key via the [`ApiKey`](crate::server::auth::ApiKey)
/// extractor on the handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::service_info)).service(
        web::scope("/v1")
            .route("/chat/completions", web::post().to(chat::chat_completions))
            .route("/models", web::get().to(models::list_models))
            .route("/models/{name}", web::get().to(models::get_model))
            .route("/models/{name}/test", web::post().to(models::test_model))
            .route("/health", web::get().to(health::health_check)),
    );
}
