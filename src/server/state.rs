//! Application state shared across HTTP handlers.

use crate::config::Config;
use crate::core::dispatcher::Dispatcher;
use crate::core::registry::ModelRegistry;
use crate::utils::error::Result;
use std::sync::Arc;

/// Shared read-only resources behind each handler.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (read-only after load).
    pub config: Arc<Config>,
    /// Enabled-model index.
    pub registry: Arc<ModelRegistry>,
    /// Dispatch core.
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let registry = Arc::new(ModelRegistry::from_config(&config));
        let dispatcher = Arc::new(Dispatcher::new(registry.clone())?);

        Ok(Self {
            config: Arc::new(config),
            registry,
            dispatcher,
        })
    }
}
