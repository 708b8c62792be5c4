//! Upstream forwarding.
//!
//! # Responsibilities
//! - Replay method, body and Content-Type against the target URL
//! - Enforce the upstream deadline over the whole exchange
//! - Follow upstream redirects, re-issuing them as bodiless GETs
//! - Buffer the final upstream body and classify the result
//!
//! # Design Decisions
//! - One attempt per request, no retries
//! - The deadline spans the whole redirect chain
//! - Every failure before a complete response becomes a `TransportFailure`
//! - Timeouts are reported like any other transport failure (502)

use std::error::Error as StdError;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::uri::InvalidUri;
use axum::http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use thiserror::Error;
use url::Url;

use crate::proxy::outcome::{ForwardOutcome, JSON_CONTENT_TYPE};

/// Deadline for one upstream exchange.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirect hops followed before the last 3xx is relayed as is.
pub const MAX_REDIRECTS: usize = 10;

/// Reasons a forward produced no usable upstream response.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid upstream url `{url}`")]
    InvalidTarget {
        url: String,
        #[source]
        source: InvalidUri,
    },

    #[error("failed to build upstream request")]
    Request(#[from] axum::http::Error),

    #[error("upstream request failed")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read upstream response body")]
    Body(#[source] axum::Error),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),
}

impl ForwardError {
    /// Message including the whole source chain, e.g.
    /// `upstream request failed: client error (Connect): tcp connect error: Connection refused`.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}

/// Sends requests to upstreams over plain HTTP.
#[derive(Clone)]
pub struct HttpForwarder {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    max_body_bytes: usize,
}

impl HttpForwarder {
    /// Forwarder with the standard upstream deadline.
    pub fn new(max_body_bytes: usize) -> Self {
        Self::with_timeout(UPSTREAM_TIMEOUT, max_body_bytes)
    }

    pub fn with_timeout(timeout: Duration, max_body_bytes: usize) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            timeout,
            max_body_bytes,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Forward one request and classify what came back.
    ///
    /// `content_type` is the inbound Content-Type; `application/json` is
    /// sent when it is absent.
    pub async fn forward(
        &self,
        target_url: &str,
        method: Method,
        body: Bytes,
        content_type: Option<HeaderValue>,
    ) -> ForwardOutcome {
        let result = match tokio::time::timeout(
            self.timeout,
            self.exchange(target_url, method, body, content_type),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ForwardError::Timeout(self.timeout)),
        };

        match result {
            Ok(outcome) => {
                tracing::debug!(
                    target_url = %target_url,
                    status = %outcome.status(),
                    "Upstream responded"
                );
                outcome
            }
            Err(e) => {
                let message = e.describe();
                tracing::warn!(target_url = %target_url, error = %message, "Upstream unreachable");
                ForwardOutcome::TransportFailure { message }
            }
        }
    }

    async fn exchange(
        &self,
        target_url: &str,
        method: Method,
        body: Bytes,
        content_type: Option<HeaderValue>,
    ) -> Result<ForwardOutcome, ForwardError> {
        let content_type =
            content_type.unwrap_or_else(|| HeaderValue::from_static(JSON_CONTENT_TYPE));

        let mut current = target_url.to_string();
        let mut request = build_request(&current, method, body, Some(content_type))?;
        let mut hops = 0;

        loop {
            let method = request.method().clone();
            let response: Response<hyper::body::Incoming> = self.client.request(request).await?;
            let (parts, body) = response.into_parts();

            if hops < MAX_REDIRECTS {
                if let Some((next, next_method)) =
                    redirect_target(&current, &method, parts.status, &parts.headers)
                {
                    tracing::debug!(
                        from = %current,
                        to = %next,
                        status = %parts.status,
                        "Following upstream redirect"
                    );
                    hops += 1;
                    request = build_request(&next, next_method, Bytes::new(), None)?;
                    current = next;
                    continue;
                }
            }

            let body = axum::body::to_bytes(Body::new(body), self.max_body_bytes)
                .await
                .map_err(ForwardError::Body)?;

            return Ok(ForwardOutcome::from_upstream(
                parts.status,
                parts.headers.get(CONTENT_TYPE).cloned(),
                body,
            ));
        }
    }
}

fn build_request(
    url: &str,
    method: Method,
    body: Bytes,
    content_type: Option<HeaderValue>,
) -> Result<Request<Body>, ForwardError> {
    let uri: Uri = url.parse().map_err(|source| ForwardError::InvalidTarget {
        url: url.to_string(),
        source,
    })?;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    Ok(builder.body(Body::from(body))?)
}

/// Where a redirect response leads, and with which method.
///
/// GET and HEAD follow every redirect status; POST follows 301/302/303 only,
/// and is re-issued as GET. `None` means the response is final.
fn redirect_target(
    current: &str,
    method: &Method,
    status: StatusCode,
    headers: &HeaderMap,
) -> Option<(String, Method)> {
    let safe = *method == Method::GET || *method == Method::HEAD;
    let follow = match status {
        StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER => {
            safe || *method == Method::POST
        }
        StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT => safe,
        _ => false,
    };
    if !follow {
        return None;
    }

    let location = headers.get(LOCATION)?.to_str().ok()?;
    let next = Url::parse(current).ok()?.join(location).ok()?;
    if next.scheme() != "http" {
        return None;
    }

    let method = if *method == Method::HEAD {
        Method::HEAD
    } else {
        Method::GET
    };
    Some((next.into(), method))
}
