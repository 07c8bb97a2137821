//! Configuration structures
//!
//! Typed configuration consumed by the infra loader. Serde-deserializable so
//! the same shapes load from environment variables, JSON, or TOML files.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    #[serde(default)]
    pub selections: SelectionsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Remote data store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the hosted store's REST endpoint
    pub base_url: String,
    /// Project api key sent alongside the bearer token
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self { base_url: String::new(), api_key: None, timeout_seconds: default_timeout_seconds() }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Saved-selections store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionsConfig {
    /// Path of the JSON file holding modal filter selections
    pub path: String,
}

impl Default for SelectionsConfig {
    fn default() -> Self {
        Self { path: "selections.json".to_string() }
    }
}

/// HTTP boundary settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the axum server
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1:8460".to_string() }
    }
}
