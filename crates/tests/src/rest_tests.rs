use crate::common::{self, ACCESS_TOKEN};
use pretty_assertions::assert_eq;
use server::supabase::{Query, SupabaseError};
use shared_types::{Alert, AlertPriority};

#[tokio::test]
async fn test_count_exact_reads_content_range() {
    let backend = common::fake_backend().await;
    let client = backend.client();

    let registros = client
        .count_exact(&Query::table("registros_diarios").select("id").eq("fecha", "2026-10-19"), Some(ACCESS_TOKEN))
        .await
        .unwrap();
    let detenciones = client
        .count_exact(&Query::table("detenciones"), Some(ACCESS_TOKEN))
        .await
        .unwrap();

    assert_eq!(registros, 42);
    assert_eq!(detenciones, 3);
}

#[tokio::test]
async fn test_count_without_content_range_is_decode_error() {
    let backend = common::fake_backend().await;
    let err = backend
        .client()
        .count_exact(&Query::table("sin_rango"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SupabaseError::Decode(_)));
}

#[tokio::test]
async fn test_count_on_missing_table_is_api_error() {
    let backend = common::fake_backend().await;
    let err = backend
        .client()
        .count_exact(&Query::table("inexistente"), None)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_fetch_all_decodes_alerts() {
    let backend = common::fake_backend().await;
    let query = Query::table("alertas")
        .select("*")
        .eq("estado", "activa")
        .order("prioridad", false)
        .limit(5);

    let alerts: Vec<Alert> = backend
        .client()
        .fetch_all(&query, Some(ACCESS_TOKEN))
        .await
        .unwrap();

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].titulo, "Corte de ruta 11-CH");
    assert_eq!(alerts[0].priority(), AlertPriority::Critica);
    assert!(alerts[0].created_at.is_some());
    assert_eq!(alerts[1].descripcion, None);
}

#[tokio::test]
async fn test_fetch_all_surfaces_backend_message() {
    let backend = common::fake_backend().await;
    let err = backend
        .client()
        .fetch_all::<serde_json::Value>(&Query::table("bitacora"), None)
        .await
        .unwrap_err();

    match err {
        SupabaseError::Api { status, code, message } => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("42P01"));
            assert!(message.contains("bitacora"));
        }
        other => panic!("unexpected {other:?}"),
    }
}
