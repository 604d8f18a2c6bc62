//! Configuration loading and validation.
//!
//! The configuration file is YAML, loaded once at startup and read-only for
//! the life of the process. Reloading means rebuilding the gateway.

pub mod models;

pub use models::{AuthConfig, ProviderConfig, ProviderType, ServerConfig};

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Providers grouped by category name. Categories are organizational
    /// only; model names route requests and must be unique among enabled
    /// entries across all categories.
    #[serde(default)]
    pub models: BTreeMap<String, Vec<ProviderConfig>>,
}

impl Config {
    /// Load and validate a configuration file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            GatewayError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("failed to parse configuration: {}", e)))?;

        config.validate()?;
        debug!(providers = config.provider_count(), "Configuration loaded");
        Ok(config)
    }

    /// All providers in category order, enabled or not.
    pub fn providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.models.values().flatten()
    }

    fn provider_count(&self) -> usize {
        self.models.values().map(Vec::len).sum()
    }

    /// Inbound-key membership check.
    pub fn is_valid_key(&self, key: &str) -> bool {
        self.auth.is_valid_key(key)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::Config("server port must not be 0".to_string()));
        }

        let mut enabled_names = HashSet::new();
        for provider in self.providers() {
            provider.validate().map_err(GatewayError::Config)?;

            // An ambiguous name would silently route to whichever entry loads
            // first, so it is rejected outright.
            if provider.enabled && !enabled_names.insert(provider.name.as_str()) {
                return Err(GatewayError::Config(format!(
                    "duplicate enabled provider name '{}'",
                    provider.name
                )));
            }
        }

        Ok(())
    }
}
