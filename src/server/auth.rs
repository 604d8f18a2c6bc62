//! Inbound caller authentication.

use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures::future::{Ready, ready};

/// A validated inbound API key.
///
/// Extracting this enforces `Authorization: Bearer <key>` against the
/// configured key list, so any handler that takes it is protected.
pub struct ApiKey(pub String);

impl FromRequest for ApiKey {
    type Error = GatewayError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(validate(req))
    }
}

fn validate(req: &HttpRequest) -> Result<ApiKey, GatewayError> {
    let key = bearer_token(req)
        .ok_or_else(|| GatewayError::Unauthorized("missing bearer credentials".to_string()))?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| GatewayError::Server("application state not configured".to_string()))?;

    if state.config.is_valid_key(key) {
        Ok(ApiKey(key.to_string()))
    } else {
        Err(GatewayError::Unauthorized("invalid API key".to_string()))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
