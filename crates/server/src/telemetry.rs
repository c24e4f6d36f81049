use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::WithExportConfig;
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::cookies;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const TRACER_NAME: &str = "sicof-nucleo";

/// Runtime for the OTLP gRPC exporter. The tonic channel spawns onto Tokio
/// and the `dioxus::serve` init closure may run outside a runtime context.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Register an OTLP trace exporter as the global tracer provider.
///
/// Dioxus owns the `tracing` subscriber; this only wires spans produced by
/// [`OtelTraceLayer`]. Reads from the environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT` collector gRPC address (required)
///   - `OTEL_SERVICE_NAME` (default `sicof-nucleo`)
///   - `DEPLOY_ENV` (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping trace export");
        return;
    };

    let service_name = std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| TRACER_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    if OTEL_RUNTIME.get().is_none() {
        match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
        {
            Ok(rt) => {
                let _ = OTEL_RUNTIME.set(rt);
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot start telemetry runtime");
                return;
            }
        }
    }
    let Some(rt) = OTEL_RUNTIME.get() else {
        return;
    };
    let _guard = rt.enter();

    use opentelemetry_otlp::WithTonicConfig;

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);

    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }

    let exporter = match builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(error = %e, %endpoint, "cannot build OTLP exporter");
            return;
        }
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider);
    tracing::info!(version = APP_VERSION, %endpoint, "trace export enabled");
}

/// Whether the request carries session material.
fn auth_status(headers: &axum::http::HeaderMap) -> &'static str {
    if cookies::extract_access_token(headers).is_some() {
        "authenticated"
    } else if cookies::extract_refresh_token(headers).is_some() {
        "refreshable"
    } else {
        "anonymous"
    }
}

/// Span name for a request path. Server function endpoints carry a hash
/// suffix that would otherwise explode span cardinality.
fn span_route(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((prefix, last))
            if prefix.starts_with("/api") && last.chars().any(|c| c.is_ascii_digit()) =>
        {
            prefix
        }
        _ => path,
    }
}

/// Tower layer that opens an OpenTelemetry server span per HTTP request.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(TRACER_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("http.request_id", request_id),
            KeyValue::new("auth.status", auth_status(req.headers())),
        ];

        let span = tracer
            .span_builder(format!("{} {}", method, span_route(&path)))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}
