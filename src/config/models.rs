//! Configuration data model.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Upstream authentication scheme of a provider.
///
/// The adapter set is closed over the two known schemes. An unrecognized tag
/// is preserved verbatim so dispatch can report it as a configuration defect
/// instead of the file failing to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderType {
    /// Credential supplied directly in configuration.
    StaticKey,
    /// Credential obtained by exchanging username/password for a bearer token.
    TokenAuth,
    /// Unknown tag, kept as written.
    Other(String),
}

impl ProviderType {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderType::StaticKey => "static_key",
            ProviderType::TokenAuth => "token_auth",
            ProviderType::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProviderType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "static_key" => ProviderType::StaticKey,
            "token_auth" => ProviderType::TokenAuth,
            _ => ProviderType::Other(tag),
        })
    }
}

/// A single upstream model endpoint.
///
/// Only the fields relevant to `type` are meaningful: `api_key` for
/// `static_key`; `auth_url`/`username`/`password`/`token`/`token_ttl_secs`
/// for `token_auth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Logical model name clients address.
    pub name: String,

    #[serde(rename = "type")]
    pub provider_type: ProviderType,

    /// Provider endpoint root; `/chat/completions` is appended.
    pub base_url: String,

    /// Static-key providers: the bearer credential.
    #[serde(default)]
    pub api_key: String,

    /// Wire-level model identifier; falls back to `name` when empty.
    #[serde(default)]
    pub model_name: String,

    /// Token ceiling applied when a request leaves `max_tokens` open.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Token-auth providers: issuance endpoint.
    #[serde(default)]
    pub auth_url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Pre-supplied bearer token; bypasses issuance and caching entirely.
    #[serde(default)]
    pub token: String,

    /// Lifetime of issued tokens.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_true() -> bool {
    true
}

fn default_token_ttl_secs() -> u64 {
    8 * 60 * 60
}

impl ProviderConfig {
    /// Model identifier sent on the wire.
    pub fn wire_model(&self) -> &str {
        if self.model_name.is_empty() {
            &self.name
        } else {
            &self.model_name
        }
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Type-specific field checks, run once at configuration load.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("provider name must not be empty".to_string());
        }
        if self.base_url.is_empty() {
            return Err(format!("provider '{}' has no base_url", self.name));
        }

        match self.provider_type {
            ProviderType::StaticKey => {
                if self.api_key.is_empty() {
                    return Err(format!("static_key provider '{}' has no api_key", self.name));
                }
            }
            ProviderType::TokenAuth => {
                if self.token.is_empty()
                    && (self.auth_url.is_empty()
                        || self.username.is_empty()
                        || self.password.is_empty())
                {
                    return Err(format!(
                        "token_auth provider '{}' needs either a token or auth_url, username and password",
                        self.name
                    ));
                }
            }
            // Left to dispatch, which reports the unknown tag as a defect.
            ProviderType::Other(_) => {}
        }

        Ok(())
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Inbound caller authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Flat set of keys accepted from callers.
    #[serde(default)]
    pub api_keys: Vec<String>,
}

impl AuthConfig {
    pub fn is_valid_key(&self, key: &str) -> bool {
        self.api_keys.iter().any(|k| k == key)
    }
}
