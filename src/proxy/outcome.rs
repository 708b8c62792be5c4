//! Forward results and their HTTP rendering.
//!
//! Status and every header are decided here, in one place, before axum
//! writes any byte of the response.

use axum::body::Bytes;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Content type used whenever one is missing or forced.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// What happened to a forwarded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// The upstream answered with a success status.
    Relayed {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },
    /// The upstream answered, but with an error status.
    UpstreamError { status: StatusCode, body: Bytes },
    /// No complete upstream response was obtained.
    TransportFailure { message: String },
}

impl ForwardOutcome {
    /// Classify the final upstream response, once redirects are followed.
    pub fn from_upstream(status: StatusCode, content_type: Option<HeaderValue>, body: Bytes) -> Self {
        if status.is_success() {
            Self::Relayed {
                status,
                content_type,
                body,
            }
        } else {
            Self::UpstreamError { status, body }
        }
    }

    /// Status the client will see.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Relayed { status, .. } | Self::UpstreamError { status, .. } => *status,
            Self::TransportFailure { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ForwardOutcome {
    fn into_response(self) -> Response {
        let json = HeaderValue::from_static(JSON_CONTENT_TYPE);

        match self {
            Self::Relayed {
                status,
                content_type,
                body,
            } => (
                status,
                [
                    (CONTENT_TYPE, content_type.unwrap_or(json)),
                    (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
                ],
                body,
            )
                .into_response(),
            Self::UpstreamError { status, body } => {
                (status, [(CONTENT_TYPE, json)], body).into_response()
            }
            Self::TransportFailure { message } => {
                let body = serde_json::json!({ "error": message }).to_string();
                (StatusCode::BAD_GATEWAY, [(CONTENT_TYPE, json)], body).into_response()
            }
        }
    }
}
