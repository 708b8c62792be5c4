//! Static dashboard assets.
//!
//! Reached only when no proxy prefix matches. GET and HEAD are served from
//! the configured directory; an unmatched POST is a bare 404.

use std::convert::Infallible;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// File server rooted at the dashboard directory.
#[derive(Clone)]
pub struct StaticFiles {
    dir: ServeDir,
}

impl StaticFiles {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: ServeDir::new(root).append_index_html_on_directories(true),
        }
    }

    /// Serve `request` from disk; missing files yield 404.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        let result: Result<_, Infallible> = self.dir.clone().oneshot(request).await;
        match result {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        }
    }
}

/// Response for a POST that matched no proxy prefix.
pub fn post_not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// Response for methods the dashboard does not implement.
pub fn not_implemented() -> Response {
    StatusCode::NOT_IMPLEMENTED.into_response()
}
