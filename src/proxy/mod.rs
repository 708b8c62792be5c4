//! Proxy forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyRequest (method, raw path, content type, buffered body)
//!     → PrefixMapping::resolve (first matching prefix)
//!         no match → RouteOutcome::NotHandled (caller falls back)
//!     → HttpForwarder::forward (single attempt, redirects followed, 10s deadline)
//!     → ForwardOutcome { Relayed | UpstreamError | TransportFailure }
//!     → IntoResponse at the HTTP boundary
//! ```
//!
//! # Design Decisions
//! - Independent of the HTTP server: callable with a plain `ProxyRequest`
//! - No shared mutable state between calls, so no locks
//! - Failures never escape as errors, only as outcomes

pub mod forward;
pub mod outcome;

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{request, HeaderValue, Method};

use crate::routing::PrefixMapping;

pub use forward::{ForwardError, HttpForwarder, MAX_REDIRECTS, UPSTREAM_TIMEOUT};
pub use outcome::{ForwardOutcome, JSON_CONTENT_TYPE};

/// Per-request context handed to the router.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Raw path including the query string.
    pub path: String,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl ProxyRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            content_type: None,
            body: Bytes::new(),
        }
    }

    /// Capture the parts of an inbound request the proxy cares about.
    pub fn from_parts(parts: &request::Parts, body: Bytes) -> Self {
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        Self {
            method: parts.method.clone(),
            path: path.to_string(),
            content_type: parts.headers.get(CONTENT_TYPE).cloned(),
            body,
        }
    }

    pub fn with_body(mut self, content_type: Option<HeaderValue>, body: impl Into<Bytes>) -> Self {
        self.content_type = content_type;
        self.body = body.into();
        self
    }
}

/// Result of routing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Handled(ForwardOutcome),
    NotHandled,
}

/// Matches requests against the prefix mapping and forwards the hits.
pub struct ProxyRouter {
    mapping: PrefixMapping,
    forwarder: HttpForwarder,
}

impl ProxyRouter {
    pub fn new(mapping: PrefixMapping, forwarder: HttpForwarder) -> Self {
        Self { mapping, forwarder }
    }

    pub fn mapping(&self) -> &PrefixMapping {
        &self.mapping
    }

    /// Forward `request` if its path starts with a configured prefix.
    pub async fn route(&self, request: ProxyRequest) -> RouteOutcome {
        let ProxyRequest {
            method,
            path,
            content_type,
            body,
        } = request;

        let Some(target) = self.mapping.resolve(&path) else {
            return RouteOutcome::NotHandled;
        };

        tracing::debug!(
            route = target.route,
            method = %method,
            target_url = %target.url,
            "Forwarding request"
        );

        let outcome = self
            .forwarder
            .forward(&target.url, method, body, content_type)
            .await;
        RouteOutcome::Handled(outcome)
    }
}
