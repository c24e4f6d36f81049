use dioxus::prelude::*;
use shared_types::{Alert, ClientConfig, DashboardStats, Profile, Session};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, SupabaseErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use crate::supabase::{self, Query, SupabaseClient};

// ── Helpers for server functions ───────────────────────

/// Access token of the caller, or an "Unauthorized" error.
#[cfg(feature = "server")]
fn require_session() -> Result<crate::auth::RequestSession, ServerFnError> {
    use shared_types::AppError;

    crate::auth::request_session()
        .ok_or_else(|| AppError::unauthorized("Sesión requerida").into_server_fn_error())
}

#[cfg(feature = "server")]
fn backend() -> Result<&'static SupabaseClient, ServerFnError> {
    supabase::client().map_err(|e| e.into_app_error().into_server_fn_error())
}

/// Flags plus the query policy the UI applies to its fetches.
#[server]
pub async fn get_client_config() -> Result<ClientConfig, ServerFnError> {
    Ok(ClientConfig::from(crate::config::load_config()))
}

// ── Session ────────────────────────────────────────────

/// Session restored from the request cookies, if the backend still accepts it.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_session() -> Result<Option<Session>, ServerFnError> {
    let Some(current) = crate::auth::request_session() else {
        return Ok(None);
    };

    let client = backend()?;
    let identity = client
        .get_user(&current.access_token)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    Ok(identity.map(|identity| Session {
        user_id: identity.id,
        email: identity.email.unwrap_or_default(),
        expires_at: current.expires_at.unwrap_or_else(chrono::Utc::now),
    }))
}

#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn sign_in(email: String, password: String) -> Result<Session, ServerFnError> {
    use crate::auth::cookies::{self, SessionTokens};
    use shared_types::{AppError, SignInRequest};

    let req = SignInRequest {
        email: email.trim().to_string(),
        password,
    };
    req.validate_request().map_err(|e| e.into_server_fn_error())?;

    let client = backend()?;
    let grant = client
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(|e| {
            if e.is_auth_rejection() {
                tracing::info!(error = %e, "sign-in rejected");
                AppError::unauthorized("Credenciales inválidas").into_server_fn_error()
            } else {
                e.into_app_error().into_server_fn_error()
            }
        })?;

    let now = chrono::Utc::now();
    cookies::schedule_session_cookies(SessionTokens::from_grant(&grant, now));
    tracing::info!(user_id = %grant.user.id, "signed in");
    Ok(grant.session(now))
}

/// Revoke the session upstream when possible and always clear the cookies.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    use crate::auth::cookies;

    if let Some(current) = crate::auth::request_session() {
        match supabase::client() {
            Ok(client) => {
                if let Err(e) = client.sign_out(&current.access_token).await {
                    tracing::warn!(error = %e, "upstream sign-out failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "skipping upstream sign-out"),
        }
    }

    cookies::schedule_clear_cookies();
    Ok(())
}

// ── Profile ────────────────────────────────────────────

/// Profile of the caller. `None` without a session or without a profile row.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_user_profile() -> Result<Option<Profile>, ServerFnError> {
    use crate::identity::{PostgrestProfileStore, ProfileResolver};

    let current = crate::auth::request_session();
    let Some(token) = current.as_ref().map(|s| s.access_token.as_str()) else {
        return Ok(None);
    };

    let client = backend()?;
    let store = PostgrestProfileStore::new(client.clone());
    ProfileResolver::new(client, &store)
        .resolve(Some(token))
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())
}

// ── Dashboard ──────────────────────────────────────────

#[cfg(feature = "server")]
const ACTIVE_ALERT_LIMIT: usize = 5;

#[cfg(feature = "server")]
fn active_alerts_query() -> Query {
    Query::table("alertas")
        .select("*")
        .eq("estado", "activa")
        .order("prioridad", false)
        .limit(ACTIVE_ALERT_LIMIT)
}

/// Highest-priority active alerts.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_active_alerts() -> Result<Vec<Alert>, ServerFnError> {
    let current = require_session()?;
    let client = backend()?;
    client
        .fetch_all(&active_alerts_query(), Some(&current.access_token))
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())
}

/// Counts for the current UTC day.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_dashboard_stats() -> Result<DashboardStats, ServerFnError> {
    let current = require_session()?;
    let client = backend()?;
    let token = Some(current.access_token.as_str());
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let registros = Query::table("registros_diarios").select("id").eq("fecha", &today);
    let detenciones = Query::table("detenciones").select("id").eq("fecha", &today);
    let alertas = Query::table("alertas").select("id").eq("estado", "activa");

    let (registros_hoy, detenciones_hoy, alertas_activas) = tokio::try_join!(
        client.count_exact(&registros, token),
        client.count_exact(&detenciones, token),
        client.count_exact(&alertas, token),
    )
    .map_err(|e| e.into_app_error().into_server_fn_error())?;

    Ok(DashboardStats {
        fecha: today,
        registros_hoy,
        detenciones_hoy,
        alertas_activas,
    })
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn active_alerts_query_orders_by_priority() {
        let url = active_alerts_query().to_url("http://h");
        assert_eq!(
            url,
            "http://h/rest/v1/alertas?select=%2A&estado=eq.activa&order=prioridad.desc&limit=5"
        );
    }
}
