use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use server::config::SupabaseSettings;
use server::supabase::SupabaseClient;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub const ANON_KEY: &str = "anon-test-key";
pub const EMAIL: &str = "ana.rojas@sicof.cl";
pub const PASSWORD: &str = "clave-segura";
pub const ACCESS_TOKEN: &str = "access-ana";
pub const REFRESH_TOKEN: &str = "refresh-ana";
/// Valid token whose identity has no row in `users`.
pub const ORPHAN_TOKEN: &str = "access-orphan";

pub const USER_ID: Uuid = Uuid::from_u128(0x0a11_ce00);
pub const ORPHAN_ID: Uuid = Uuid::from_u128(0x0bad_f00d);
pub const CUARTEL_ID: Uuid = Uuid::from_u128(0xc0_ffee);

/// Requests seen by the fake backend, by route.
#[derive(Default)]
pub struct Calls {
    pub token: AtomicUsize,
    pub user: AtomicUsize,
    pub logout: AtomicUsize,
    pub rest: AtomicUsize,
}

impl Calls {
    pub fn rest(&self) -> usize {
        self.rest.load(Ordering::SeqCst)
    }
}

struct FakeState {
    calls: Arc<Calls>,
    counts: HashMap<&'static str, u64>,
}

/// In-process stand-in for the hosted auth and REST services.
pub struct FakeBackend {
    pub addr: SocketAddr,
    pub calls: Arc<Calls>,
}

impl FakeBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> SupabaseClient {
        SupabaseClient::new(&SupabaseSettings {
            url: self.url(),
            anon_key: ANON_KEY.to_string(),
        })
        .unwrap()
    }
}

/// Start the fake backend on an ephemeral port for the current test.
pub async fn fake_backend() -> FakeBackend {
    let calls = Arc::new(Calls::default());
    let state = Arc::new(FakeState {
        calls: calls.clone(),
        counts: HashMap::from([("registros_diarios", 42), ("detenciones", 3), ("alertas", 2)]),
    });

    let router = Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/user", get(user))
        .route("/auth/v1/logout", post(logout))
        .route("/rest/v1/users", get(users))
        .route("/rest/v1/{table}", get(table))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    FakeBackend { addr, calls }
}

pub fn grant_json(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "expires_in": 3600,
        "user": { "id": USER_ID, "email": EMAIL, "aud": "authenticated" }
    })
}

pub fn profile_row() -> Value {
    json!({
        "id": USER_ID,
        "full_name": "Ana Rojas",
        "role": "admin_operaciones",
        "cuartel_id": CUARTEL_ID,
        "created_at": "2026-01-05T12:00:00Z",
        "cuarteles": { "id": CUARTEL_ID, "nombre": "Cuartel Chacalluta", "codigo": "CHA" }
    })
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn has_anon_key(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(ANON_KEY)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "code": 401, "error_code": "bad_jwt", "msg": "invalid JWT" })),
    )
        .into_response()
}

async fn token(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.calls.token.fetch_add(1, Ordering::SeqCst);
    if !has_anon_key(&headers) {
        return unauthorized();
    }

    match params.get("grant_type").map(String::as_str) {
        Some("password") => {
            if body["email"] == EMAIL && body["password"] == PASSWORD {
                Json(grant_json(ACCESS_TOKEN, REFRESH_TOKEN)).into_response()
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "code": 400,
                        "error_code": "invalid_credentials",
                        "msg": "Invalid login credentials"
                    })),
                )
                    .into_response()
            }
        }
        Some("refresh_token") => {
            if body["refresh_token"] == REFRESH_TOKEN {
                Json(grant_json("access-ana-2", "refresh-ana-2")).into_response()
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_grant",
                        "error_description": "Invalid Refresh Token: Refresh Token Not Found"
                    })),
                )
                    .into_response()
            }
        }
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn user(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> Response {
    state.calls.user.fetch_add(1, Ordering::SeqCst);
    match bearer(&headers) {
        Some(ACCESS_TOKEN) => Json(json!({ "id": USER_ID, "email": EMAIL })).into_response(),
        Some("access-denied") => Json(json!({ "id": USER_ID, "email": EMAIL })).into_response(),
        Some(ORPHAN_TOKEN) => Json(json!({ "id": ORPHAN_ID, "email": "sin.perfil@sicof.cl" })).into_response(),
        Some("access-broken") => (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response(),
        _ => unauthorized(),
    }
}

async fn logout(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> Response {
    state.calls.logout.fetch_add(1, Ordering::SeqCst);
    match bearer(&headers) {
        Some(ACCESS_TOKEN) => StatusCode::NO_CONTENT.into_response(),
        _ => unauthorized(),
    }
}

async fn users(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.calls.rest.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers) == Some("access-denied") {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "code": "42501", "message": "permission denied for table users" })),
        )
            .into_response();
    }

    let wants_object = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("vnd.pgrst.object"));
    let found = params.get("id") == Some(&format!("eq.{USER_ID}"));

    match (wants_object, found) {
        (true, true) => Json(profile_row()).into_response(),
        (true, false) => (
            StatusCode::NOT_ACCEPTABLE,
            Json(json!({
                "code": "PGRST116",
                "details": "The result contains 0 rows",
                "hint": null,
                "message": "JSON object requested, multiple (or no) rows returned"
            })),
        )
            .into_response(),
        (false, true) => Json(json!([profile_row()])).into_response(),
        (false, false) => Json(json!([])).into_response(),
    }
}

async fn table(
    State(state): State<Arc<FakeState>>,
    Path(name): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    state.calls.rest.fetch_add(1, Ordering::SeqCst);
    let counting = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("count=exact"));

    if method == Method::HEAD && counting {
        return match name.as_str() {
            "sin_rango" => StatusCode::OK.into_response(),
            other => match state.counts.get(other) {
                Some(n) => (
                    StatusCode::OK,
                    [(header::CONTENT_RANGE, format!("*/{n}"))],
                )
                    .into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            },
        };
    }

    match name.as_str() {
        "alertas" => Json(json!([
            {
                "id": Uuid::from_u128(1),
                "titulo": "Corte de ruta 11-CH",
                "descripcion": "Nevazón en Chungará",
                "prioridad": "critica",
                "estado": "activa",
                "created_at": "2026-10-19T08:30:00Z"
            },
            {
                "id": Uuid::from_u128(2),
                "titulo": "Aforo elevado",
                "prioridad": "media",
                "estado": "activa"
            }
        ]))
        .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": "42P01", "message": format!("relation \"public.{name}\" does not exist") })),
        )
            .into_response(),
    }
}
