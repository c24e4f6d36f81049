use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false` so that a
/// missing or incomplete config file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
}

/// Client-side query behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryPolicy {
    /// Extra attempts after a failed fetch.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_retries() -> u32 {
    1
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            retries: default_retries(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub query: QueryPolicy,
}

/// Everything the client needs from the server-side configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClientConfig {
    pub features: FeatureFlags,
    pub query: QueryPolicy,
}

impl From<&AppConfig> for ClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            features: config.features.clone(),
            query: config.query.clone(),
        }
    }
}
