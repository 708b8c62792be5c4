//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields: route, target_url, status)
//!
//! HTTP layer:
//!     → TraceLayer span per request (method, uri, x-request-id)
//!     → QuietAccessLog emits only for 404 / 500 / 502
//! ```

pub mod logging;
