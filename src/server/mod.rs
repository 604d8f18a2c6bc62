//! HTTP server implementation.

pub mod auth;
pub mod routes;
pub mod state;


use crate::config::Config;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, web};
use state::AppState;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server over the dispatch core.
pub struct HttpServer {
    bind: (String, u16),
    state: AppState,
}

impl HttpServer {
    /// Build the dispatch core and wrap it in server state.
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating HTTP server");

        let bind = (config.server.host.clone(), config.server.port);
        let state = AppState::new(config)?;
        Ok(Self { bind, state })
    }

    /// Create the Actix-web application around shared state.
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(routes::configure)
    }

    /// Bind and serve until shutdown.
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.bind.0, self.bind.1);
        info!("Starting HTTP server on {}", addr);
        info!("API endpoints:");
        info!("   POST /v1/chat/completions - Chat completions");
        info!("   GET  /v1/models - Model list");
        info!("   POST /v1/models/{{name}}/test - Model probe");
        info!("   GET  /v1/health - Health check");

        let state = web::Data::new(self.state);
        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&addr)
            .map_err(|e| GatewayError::Server(format!("failed to bind {}: {}", addr, e)))?
            .run();

        server
            .await
            .map_err(|e| GatewayError::Server(format!("server error: {}", e)))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
