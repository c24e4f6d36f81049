//! Client for the hosted backend-as-a-service: the auth API (`/auth/v1`)
//! and the REST query surface (`/rest/v1`).

pub mod auth;
pub mod error;
pub mod rest;

pub use auth::{AuthIdentity, TokenGrant};
pub use error::SupabaseError;
pub use rest::{parse_content_range_total, Query};

use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::OnceLock;

use crate::config::{SupabaseSettings, CLIENT_INFO};

/// Shared HTTP client bound to one backend project.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(settings: &SupabaseSettings) -> Result<Self, SupabaseError> {
        let mut headers = HeaderMap::new();
        let apikey = HeaderValue::from_str(&settings.anon_key)
            .map_err(|_| SupabaseError::Config("SUPABASE_ANON_KEY is not a valid header value".into()))?;
        headers.insert("apikey", apikey);
        headers.insert("x-client-info", HeaderValue::from_static(CLIENT_INFO));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.url.clone(),
            anon_key: settings.anon_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer used for REST calls: the user's access token so row-level
    /// security applies, or the anon key when there is none.
    pub(crate) fn bearer<'a>(&'a self, access_token: Option<&'a str>) -> &'a str {
        access_token.unwrap_or(&self.anon_key)
    }
}

/// Decode a JSON body, turning non-success statuses into `Api` errors.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, SupabaseError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(error::api_error(status.as_u16(), &body));
    }
    serde_json::from_str(&body).map_err(|e| SupabaseError::Decode(e.to_string()))
}

static CLIENT: OnceLock<SupabaseClient> = OnceLock::new();

/// Process-wide client built from the environment on first use.
pub fn client() -> Result<&'static SupabaseClient, SupabaseError> {
    if let Some(c) = CLIENT.get() {
        return Ok(c);
    }
    let settings = SupabaseSettings::from_env()?;
    let built = SupabaseClient::new(&settings)?;
    tracing::info!(url = %settings.url, "backend client initialised");
    // A concurrent caller may have won the race; either value is equivalent.
    let _ = CLIENT.set(built);
    CLIENT
        .get()
        .ok_or_else(|| SupabaseError::Config("backend client unavailable".into()))
}
