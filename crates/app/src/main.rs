use dioxus::prelude::*;
use dioxus_primitives::toast::ToastProvider;
use shared_types::ClientConfig;

mod components;
mod format_helpers;
mod identity;
pub mod notify;
mod query;
pub mod role_gate;
mod routes;
mod session;

use identity::IdentityClient;
use query::use_profile_provider;
use routes::Route;
use session::{use_session_provider, SessionChannel};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        let config = server::config::load_config();

        if config.features.telemetry {
            server::telemetry::init_telemetry();
        }

        if let Err(e) = server::supabase::client() {
            tracing::error!(error = %e, "backend client unavailable; sign-in will fail until configured");
        }

        let mut router = dioxus::server::router(App);

        if config.features.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(axum::middleware::from_fn(
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Fetch client config once and provide via context (defaults on error)
    let config_resource =
        use_server_future(move || async move { server::api::get_client_config().await })?;

    let config = config_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(ClientConfig::default()))
        .unwrap_or_default();

    use_context_provider(|| config.query.clone());

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "auth-guard-loading",
                        p { "Cargando..." }
                    }
                },
                SessionRoot {}
            }
        }
    }
}

/// Owns the identity client, the session holder and the profile query, and
/// hands them to the router as context.
#[component]
fn SessionRoot() -> Element {
    let policy: shared_types::QueryPolicy = use_context();

    let identity = use_context_provider(|| IdentityClient::new(SessionChannel::new()));
    let session = use_session_provider(identity);
    use_profile_provider(session, policy.retries);

    rsx! { Router::<Route> {} }
}
