//! # LLM Gateway
//!
//! A lightweight gateway that fronts heterogeneous chat-completion providers
//! behind one OpenAI-style API. Logical model names resolve to provider
//! configurations; each provider's authentication scheme — a static API key,
//! or a username/password exchange for an expiring bearer token — is handled
//! behind a uniform dispatch interface.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use llm_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::dispatcher::Dispatcher;
pub use core::registry::ModelRegistry;
pub use core::types::{ChatMessage, ChatRequest};
pub use utils::error::{CredentialError, GatewayError, Result};

use tracing::info;

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A configured gateway ready to serve.
pub struct Gateway {
    server: server::HttpServer,
}

impl Gateway {
    /// Build the dispatch core and HTTP server from a loaded configuration.
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating gateway instance");

        let server = server::HttpServer::new(config)?;
        Ok(Self { server })
    }

    /// Serve until shutdown.
    pub async fn run(self) -> Result<()> {
        info!("Starting LLM Gateway v{}", VERSION);
        self.server.start().await
    }
}
