//! Enabled-model index.

use crate::config::{Config, ProviderConfig};
use crate::utils::error::{GatewayError, Result};
use tracing::debug;

/// Read-only index of enabled providers, built once at startup.
///
/// Disabled entries are dropped at construction, so lookups can never observe
/// them. Name uniqueness among enabled entries is enforced by
/// [`Config::validate`] before the registry is built; rebuilding the registry
/// is the only way to pick up configuration changes.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    providers: Vec<ProviderConfig>,
}

impl ModelRegistry {
    /// Flatten the category-grouped configuration into the enabled set.
    pub fn from_config(config: &Config) -> Self {
        let providers: Vec<ProviderConfig> =
            config.providers().filter(|p| p.enabled).cloned().collect();
        debug!(enabled = providers.len(), "Model registry built");
        Self { providers }
    }

    /// Enabled providers, in configuration order.
    pub fn list_enabled(&self) -> &[ProviderConfig] {
        &self.providers
    }

    /// Look up an enabled provider by model name.
    pub fn find_by_name(&self, name: &str) -> Result<&ProviderConfig> {
        self.providers
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| GatewayError::ModelNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
