use crate::common::{self, REFRESH_TOKEN};
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, StatusCode},
    middleware,
    routing::get,
    Router,
};
use pretty_assertions::assert_eq;
use server::auth::cookies::{CookieSlot, PendingCookieAction};
use server::auth::middleware::auth_middleware;
use server::auth::RequestSession;
use tower::ServiceExt;

/// Echoes the access token the middleware attached, or "anonymous".
async fn probe(req: Request) -> String {
    req.extensions()
        .get::<RequestSession>()
        .map(|s| s.access_token.clone())
        .unwrap_or_else(|| "anonymous".into())
}

/// Behaves like sign-out: schedules the session cookies for removal.
async fn leave(req: Request) -> StatusCode {
    if let Some(slot) = req.extensions().get::<CookieSlot>() {
        slot.put(PendingCookieAction::Clear);
    }
    StatusCode::NO_CONTENT
}

fn app() -> Router {
    Router::new()
        .route("/probe", get(probe))
        .route("/leave", get(leave))
        .layer(middleware::from_fn(auth_middleware))
}

async fn send(uri: &str, cookie: Option<&str>) -> (StatusCode, Vec<String>, String) {
    let mut builder = axum::http::Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let response = app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let set_cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, set_cookies, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_anonymous_request_passes_through() {
    let (status, set_cookies, body) = send("/probe", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "anonymous");
    assert!(set_cookies.is_empty());
}

#[tokio::test]
async fn test_access_cookie_attaches_session() {
    let (_, set_cookies, body) = send(
        "/probe",
        Some("theme=dark; sicof_access=access-ana; sicof_expires_at=1792396800"),
    )
    .await;
    assert_eq!(body, "access-ana");
    assert!(set_cookies.is_empty());
}

#[tokio::test]
async fn test_scheduled_clear_expires_all_cookies() {
    let (status, set_cookies, _) = send("/leave", Some("sicof_access=access-ana")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(set_cookies.len(), 3);
    for name in ["sicof_access=", "sicof_refresh=", "sicof_expires_at="] {
        let cookie = set_cookies.iter().find(|c| c.starts_with(name)).unwrap();
        assert!(cookie.contains("Max-Age=0"), "{cookie}");
        assert!(cookie.contains("HttpOnly"), "{cookie}");
    }
}

/// Both refresh outcomes share one test: the backend client is process-wide
/// and bound to the first fake backend it sees.
#[tokio::test]
async fn test_refresh_cookie_renews_or_clears_session() {
    let backend = common::fake_backend().await;
    std::env::set_var("SUPABASE_URL", backend.url());
    std::env::set_var("SUPABASE_ANON_KEY", common::ANON_KEY);

    let cookie = format!("sicof_refresh={REFRESH_TOKEN}");
    let (_, set_cookies, body) = send("/probe", Some(&cookie)).await;
    assert_eq!(body, "access-ana-2");
    assert!(set_cookies.iter().any(|c| c.starts_with("sicof_access=access-ana-2")));
    assert!(set_cookies.iter().any(|c| c.starts_with("sicof_refresh=refresh-ana-2")));

    let (_, set_cookies, body) = send("/probe", Some("sicof_refresh=revocado")).await;
    assert_eq!(body, "anonymous");
    assert_eq!(set_cookies.len(), 3);
    assert!(set_cookies.iter().all(|c| c.contains("Max-Age=0")));
}
