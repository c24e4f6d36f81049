use crate::common::{self, ACCESS_TOKEN, CUARTEL_ID, ORPHAN_ID, ORPHAN_TOKEN, USER_ID};
use pretty_assertions::assert_eq;
use server::error_convert::SupabaseErrorExt;
use server::identity::{PostgrestProfileStore, ProfileResolver, ProfileStore};
use shared_types::{AppErrorKind, Role};
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_resolves_profile_with_unit() {
    let backend = common::fake_backend().await;
    let client = backend.client();
    let store = PostgrestProfileStore::new(client.clone());

    let profile = ProfileResolver::new(&client, &store)
        .resolve(Some(ACCESS_TOKEN))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(profile.id, USER_ID);
    assert_eq!(profile.full_name, "Ana Rojas");
    assert_eq!(profile.role, Some(Role::AdminOperaciones));
    assert_eq!(profile.cuartel_id, Some(CUARTEL_ID));
    assert_eq!(profile.cuartel.unwrap().nombre, "Cuartel Chacalluta");
}

#[tokio::test]
async fn test_no_token_touches_nothing() {
    let backend = common::fake_backend().await;
    let client = backend.client();
    let store = PostgrestProfileStore::new(client.clone());

    let profile = ProfileResolver::new(&client, &store).resolve(None).await.unwrap();

    assert!(profile.is_none());
    assert_eq!(backend.calls.user.load(Ordering::SeqCst), 0);
    assert_eq!(backend.calls.rest(), 0);
}

#[tokio::test]
async fn test_rejected_token_skips_profile_lookup() {
    let backend = common::fake_backend().await;
    let client = backend.client();
    let store = PostgrestProfileStore::new(client.clone());

    let profile = ProfileResolver::new(&client, &store)
        .resolve(Some("expirado"))
        .await
        .unwrap();

    assert!(profile.is_none());
    assert_eq!(backend.calls.user.load(Ordering::SeqCst), 1);
    assert_eq!(backend.calls.rest(), 0);
}

#[tokio::test]
async fn test_identity_without_row_resolves_to_none() {
    let backend = common::fake_backend().await;
    let client = backend.client();
    let store = PostgrestProfileStore::new(client.clone());

    let profile = ProfileResolver::new(&client, &store)
        .resolve(Some(ORPHAN_TOKEN))
        .await
        .unwrap();

    assert!(profile.is_none());
    assert_eq!(backend.calls.rest(), 1);
}

#[tokio::test]
async fn test_store_reads_single_row_by_id() {
    let backend = common::fake_backend().await;
    let store = PostgrestProfileStore::new(backend.client());

    let found = store.fetch_profile(ACCESS_TOKEN, USER_ID).await.unwrap();
    assert_eq!(found.map(|p| p.id), Some(USER_ID));

    let missing = store.fetch_profile(ACCESS_TOKEN, ORPHAN_ID).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_denied_profile_read_is_forbidden() {
    let backend = common::fake_backend().await;
    let client = backend.client();
    let store = PostgrestProfileStore::new(client.clone());

    let err = ProfileResolver::new(&client, &store)
        .resolve(Some("access-denied"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    let app = err.into_app_error();
    assert_eq!(app.kind, AppErrorKind::Forbidden);
    assert_eq!(app.message, "permission denied for table users");
}
