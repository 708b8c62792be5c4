//! Local development dashboard: static assets plus a fixed prefix proxy
//! to the services running next to it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::schema::DashboardConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{ForwardOutcome, ProxyRequest, ProxyRouter, RouteOutcome};
