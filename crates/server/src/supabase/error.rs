use serde::Deserialize;

/// Failure talking to the hosted backend.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    #[error("missing configuration: {0}")]
    Config(String),
    #[error("request to backend failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("unexpected backend response: {0}")]
    Decode(String),
}

impl SupabaseError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SupabaseError::Api { status, .. } => Some(*status),
            SupabaseError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the backend rejected the caller's credentials or token.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.status(), Some(400 | 401 | 403))
    }
}

/// Union of the error bodies produced by the auth and REST services.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Build an `Api` error from a non-success status and its raw body.
pub(crate) fn api_error(status: u16, body: &str) -> SupabaseError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = parsed
        .error_code
        .or_else(|| match parsed.code {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        })
        .or_else(|| parsed.error.clone());
    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        });
    SupabaseError::Api {
        status,
        code,
        message,
    }
}
