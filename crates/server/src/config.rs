use shared_types::AppConfig;
use std::sync::OnceLock;

use crate::supabase::SupabaseError;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Header sent with every backend request to identify this client.
pub const CLIENT_INFO: &str = "sicof-nucleo";

/// Read `config.toml` and store it in the global `OnceLock`. Safe to call
/// multiple times; only the first call has effect.
///
/// If the file is missing or unparseable, defaults are used.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "config file not found, using defaults");
            AppConfig::default()
        }
    })
}

fn parse_config(contents: &str) -> AppConfig {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => {
            tracing::info!(features = ?config.features, query = ?config.query, "loaded config");
            config
        }
        Err(e) => {
            tracing::error!(path = CONFIG_PATH, error = %e, "failed to parse config, using defaults");
            AppConfig::default()
        }
    }
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseSettings {
    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY` (a `.env` file is honoured).
    pub fn from_env() -> Result<Self, SupabaseError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(
            std::env::var("SUPABASE_URL").ok(),
            std::env::var("SUPABASE_ANON_KEY").ok(),
        )
    }

    pub fn from_vars(url: Option<String>, anon_key: Option<String>) -> Result<Self, SupabaseError> {
        let url = url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| SupabaseError::Config("SUPABASE_URL is not set".into()))?;
        let anon_key = anon_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SupabaseError::Config("SUPABASE_ANON_KEY is not set".into()))?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}
