use crate::common::{self, ACCESS_TOKEN, EMAIL, PASSWORD, REFRESH_TOKEN, USER_ID};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use server::supabase::SupabaseError;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_sign_in_returns_grant_and_session() {
    let backend = common::fake_backend().await;
    let client = backend.client();

    let grant = client.sign_in_with_password(EMAIL, PASSWORD).await.unwrap();
    assert_eq!(grant.access_token, ACCESS_TOKEN);
    assert_eq!(grant.refresh_token, REFRESH_TOKEN);

    let now = Utc::now();
    let session = grant.session(now);
    assert_eq!(session.user_id, USER_ID);
    assert_eq!(session.email, EMAIL);
    assert_eq!(session.expires_at, now + Duration::seconds(3600));
}

#[tokio::test]
async fn test_sign_in_wrong_password_is_auth_rejection() {
    let backend = common::fake_backend().await;
    let err = backend
        .client()
        .sign_in_with_password(EMAIL, "otra-clave")
        .await
        .unwrap_err();

    assert!(err.is_auth_rejection());
    match err {
        SupabaseError::Api { status, code, message } => {
            assert_eq!(status, 400);
            assert_eq!(code.as_deref(), Some("invalid_credentials"));
            assert_eq!(message, "Invalid login credentials");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_exchanges_tokens() {
    let backend = common::fake_backend().await;
    let grant = backend.client().refresh_session(REFRESH_TOKEN).await.unwrap();
    assert_eq!(grant.access_token, "access-ana-2");
    assert_eq!(grant.refresh_token, "refresh-ana-2");
    assert_eq!(grant.user.id, USER_ID);
}

#[tokio::test]
async fn test_refresh_with_revoked_token_is_rejected() {
    let backend = common::fake_backend().await;
    let err = backend.client().refresh_session("revocado").await.unwrap_err();
    assert!(err.is_auth_rejection());
    match err {
        SupabaseError::Api { code, .. } => assert_eq!(code.as_deref(), Some("invalid_grant")),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_get_user_for_valid_token() {
    let backend = common::fake_backend().await;
    let identity = backend.client().get_user(ACCESS_TOKEN).await.unwrap().unwrap();
    assert_eq!(identity.id, USER_ID);
    assert_eq!(identity.email.as_deref(), Some(EMAIL));
}

#[tokio::test]
async fn test_get_user_for_expired_token_is_none() {
    let backend = common::fake_backend().await;
    let identity = backend.client().get_user("expirado").await.unwrap();
    assert!(identity.is_none());
}

#[tokio::test]
async fn test_get_user_server_failure_is_error() {
    let backend = common::fake_backend().await;
    let err = backend.client().get_user("access-broken").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!err.is_auth_rejection());
}

#[tokio::test]
async fn test_sign_out_accepts_stale_tokens() {
    let backend = common::fake_backend().await;
    let client = backend.client();

    client.sign_out(ACCESS_TOKEN).await.unwrap();
    client.sign_out("ya-revocado").await.unwrap();
    assert_eq!(backend.calls.logout.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    let backend = common::fake_backend().await;
    let client = server::supabase::SupabaseClient::new(&server::config::SupabaseSettings {
        url: "http://127.0.0.1:1".into(),
        anon_key: common::ANON_KEY.into(),
    })
    .unwrap();

    let err = client.sign_in_with_password(EMAIL, PASSWORD).await.unwrap_err();
    assert!(matches!(err, SupabaseError::Http(_)));
    assert_eq!(backend.calls.token.load(Ordering::SeqCst), 0);
}
