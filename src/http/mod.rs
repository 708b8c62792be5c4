//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, quiet tracing)
//!     → GET/POST: buffer body → proxy::ProxyRouter::route
//!         Handled     → ForwardOutcome rendered as the response
//!         NotHandled  → GET: static_files.rs, POST: 404
//!     → HEAD: static_files.rs, anything else: 501
//!     → Send to client
//! ```

pub mod request;
pub mod server;
pub mod static_files;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
pub use static_files::StaticFiles;
