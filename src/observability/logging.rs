//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Log the startup banner (listen URL and route table)
//! - Keep access logging quiet: only 404, 500 and 502 responses are logged
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{Response, StatusCode};
use tower_http::trace::OnResponse;
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::routing::PrefixMapping;

/// Install the global subscriber. `level` applies when `RUST_LOG` is unset.
pub fn init(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("dashboard_proxy={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Log where the dashboard listens and where each prefix goes.
pub fn log_banner(addr: &SocketAddr, mapping: &PrefixMapping) {
    tracing::info!(url = %format!("http://{addr}"), "Dashboard listening");
    for route in mapping.routes() {
        tracing::info!(
            route = %route.name,
            prefix = %format!("{}*", route.prefix()),
            upstream = %route.upstream(),
            "Proxy route"
        );
    }
    tracing::info!("Press Ctrl+C to stop");
}

/// Statuses worth an access log line.
pub fn is_logged_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::NOT_FOUND | StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY
    )
}

/// `OnResponse` that stays silent unless the status is a logged one.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuietAccessLog;

impl<B> OnResponse<B> for QuietAccessLog {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status();
        if is_logged_status(status) {
            tracing::warn!(
                status = status.as_u16(),
                latency_ms = latency.as_millis() as u64,
                "Request failed"
            );
        }
    }
}
