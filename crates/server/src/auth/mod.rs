pub mod cookies;
pub mod middleware;

use chrono::{DateTime, Utc};

/// Session material attached to a request by `auth_middleware`.
#[derive(Clone, Debug)]
pub struct RequestSession {
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Session of the request currently being served, if any.
/// Prefers the middleware-injected value and falls back to parsing cookies.
pub fn request_session() -> Option<RequestSession> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(session) = parts.extensions.get::<RequestSession>() {
        return Some(session.clone());
    }

    let headers = parts.headers.clone();
    cookies::extract_access_token(&headers).map(|access_token| RequestSession {
        access_token,
        expires_at: cookies::extract_expires_at(&headers),
    })
}
