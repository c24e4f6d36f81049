use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

use crate::supabase::TokenGrant;

pub const SICOF_ACCESS: &str = "sicof_access";
pub const SICOF_REFRESH: &str = "sicof_refresh";
pub const SICOF_EXPIRES_AT: &str = "sicof_expires_at";

/// Lifetime of the refresh cookie. The backend decides whether the refresh
/// token itself is still valid.
const REFRESH_MAX_AGE_DAYS: i64 = 30;

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

/// Build a Set-Cookie header value for an HTTP-only session cookie.
/// `None` if the value cannot be carried in a header.
pub fn build_cookie(name: &'static str, value: &str, max_age_seconds: i64) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((name, value))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_seconds.max(0)))
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    HeaderValue::from_str(&cookie.build().to_string()).ok()
}

/// Set the three session cookies from a token grant.
pub fn set_session_cookies(headers: &mut HeaderMap, tokens: &SessionTokens) {
    let access_max_age = (tokens.expires_at - Utc::now()).num_seconds();
    let cookies = [
        build_cookie(SICOF_ACCESS, &tokens.access_token, access_max_age),
        build_cookie(SICOF_REFRESH, &tokens.refresh_token, REFRESH_MAX_AGE_DAYS * 86400),
        build_cookie(
            SICOF_EXPIRES_AT,
            &tokens.expires_at.timestamp().to_string(),
            REFRESH_MAX_AGE_DAYS * 86400,
        ),
    ];
    for value in cookies.into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Expire all session cookies.
pub fn clear_session_cookies(headers: &mut HeaderMap) {
    for name in [SICOF_ACCESS, SICOF_REFRESH, SICOF_EXPIRES_AT] {
        if let Some(value) = build_cookie(name, "", 0) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}

/// Extract the access token from cookies (preferred) or Bearer header (fallback).
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, SICOF_ACCESS) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, SICOF_REFRESH)
}

pub fn extract_expires_at(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    extract_cookie(headers, SICOF_EXPIRES_AT)
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name && !c.value().is_empty() {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}

/// Token material written to the session cookies.
#[derive(Clone, Debug)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionTokens {
    pub fn from_grant(grant: &TokenGrant, now: DateTime<Utc>) -> Self {
        Self {
            access_token: grant.access_token.clone(),
            refresh_token: grant.refresh_token.clone(),
            expires_at: grant.expires_at(now),
        }
    }
}

/// Pending cookie action to be picked up by the auth middleware.
#[derive(Clone, Debug)]
pub enum PendingCookieAction {
    Set(SessionTokens),
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut guard| guard.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// Schedule session cookies to be set by the middleware.
pub fn schedule_session_cookies(tokens: SessionTokens) {
    schedule(PendingCookieAction::Set(tokens));
}

/// Schedule session cookies to be cleared by the middleware.
pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}
