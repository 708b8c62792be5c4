//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dashboard handler
//! - Wire up middleware (request ID, quiet tracing)
//! - Dispatch by method: GET/POST try the proxy, then fall back
//! - Serve until the shutdown signal, finishing in-flight requests

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{request_id::SetRequestIdLayer, trace::TraceLayer};

use crate::config::DashboardConfig;
use crate::http::request::{self, UuidRequestId};
use crate::http::static_files::{self, StaticFiles};
use crate::lifecycle::shutdown;
use crate::observability::logging::QuietAccessLog;
use crate::proxy::{HttpForwarder, ProxyRequest, ProxyRouter, RouteOutcome, JSON_CONTENT_TYPE};
use crate::routing::PrefixMapping;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ProxyRouter>,
    pub static_files: StaticFiles,
    pub max_body_bytes: usize,
}

/// HTTP server for the dashboard.
pub struct HttpServer {
    router: Router,
    proxy: Arc<ProxyRouter>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &DashboardConfig) -> Self {
        let forwarder = HttpForwarder::new(config.limits.max_body_bytes);
        Self::with_forwarder(config, forwarder)
    }

    /// Like `new`, with an explicit forwarder (e.g. a shorter deadline).
    pub fn with_forwarder(config: &DashboardConfig, forwarder: HttpForwarder) -> Self {
        let mapping = PrefixMapping::from_config(&config.prefix_routes());
        let proxy = Arc::new(ProxyRouter::new(mapping, forwarder));

        let state = AppState {
            proxy: proxy.clone(),
            static_files: StaticFiles::new(&config.static_files.root),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(state);
        Self { router, proxy }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dashboard_handler)
            .with_state(state)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|req: &Request<Body>| request::make_span(req))
                    .on_request(())
                    .on_response(QuietAccessLog)
                    .on_failure(()),
            )
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The router, for serving without a listener (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn mapping(&self) -> &PrefixMapping {
        self.proxy.mapping()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Entry point for every request.
async fn dashboard_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    match method {
        Method::GET | Method::POST => proxy_or_fallback(&state, request).await,
        Method::HEAD => state.static_files.serve(request).await,
        _ => static_files::not_implemented(),
    }
}

/// Forward through the proxy, or fall back: GET to static files, POST to 404.
async fn proxy_or_fallback(state: &AppState, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request body");
            let message = serde_json::json!({ "error": e.to_string() }).to_string();
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                [(CONTENT_TYPE, JSON_CONTENT_TYPE)],
                message,
            )
                .into_response();
        }
    };

    let inbound = ProxyRequest::from_parts(&parts, body.clone());
    match state.proxy.route(inbound).await {
        RouteOutcome::Handled(outcome) => outcome.into_response(),
        RouteOutcome::NotHandled if parts.method == Method::GET => {
            let request = Request::from_parts(parts, Body::from(body));
            state.static_files.serve(request).await
        }
        RouteOutcome::NotHandled => static_files::post_not_found(),
    }
}
