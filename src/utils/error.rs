//! Error handling for the gateway.
//!
//! One crate-wide error enum, with credential issuance failures split out so
//! network-origin and protocol-origin causes stay distinguishable.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Result type alias for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure to obtain a bearer token from an issuance endpoint.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The endpoint could not be reached (timeout, refused connection, DNS).
    #[error("token request for '{provider}' failed: {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("token endpoint for '{provider}' returned {status}: {body}")]
    Rejected {
        provider: String,
        status: u16,
        body: String,
    },

    /// The endpoint answered 200 but the body carries no usable token.
    #[error("token response for '{provider}' has no access_token")]
    MalformedResponse { provider: String },
}

/// Main error type for the gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client errors (transport failures talking to a provider)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Unknown or disabled model name
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Configuration names a provider type with no adapter
    #[error("Unsupported provider type: {0}")]
    UnsupportedProviderType(String),

    /// Credential issuance failed
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// The provider rejected or failed the chat call
    #[error("Provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Inbound caller authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server errors
    #[error("Server error: {0}")]
    Server(String),
}

impl GatewayError {
    fn kind(&self) -> &'static str {
        match self {
            GatewayError::Config(_) => "config_error",
            GatewayError::Io(_) => "io_error",
            GatewayError::Yaml(_) | GatewayError::Serialization(_) => "serialization_error",
            GatewayError::HttpClient(_) => "network_error",
            GatewayError::ModelNotFound(_) => "model_not_found",
            GatewayError::UnsupportedProviderType(_) => "unsupported_provider_type",
            GatewayError::Credential(_) => "credential_error",
            GatewayError::Upstream { .. } => "upstream_error",
            GatewayError::Unauthorized(_) => "unauthorized",
            GatewayError::Server(_) => "internal_error",
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::ModelNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            // The provider's own status is relayed so callers can diagnose it.
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(json!({
            "error": {
                "message": self.to_string(),
                "type": self.kind(),
                "code": status.as_u16(),
            }
        }))
    }
}
