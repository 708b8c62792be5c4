//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dashboard.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Built-in services reached through the dashboard: (name, prefix, port).
const BUILTIN_SERVICES: [(&str, &str, u16); 5] = [
    ("opensearch", "/api/opensearch/", 9200),
    ("vector", "/api/vector/", 18080),
    ("ticketing", "/api/ticketing/", 18081),
    ("feast", "/api/feast/", 6567),
    ("airflow", "/api/airflow/", 28080),
];

/// Root configuration for the dashboard server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Host the built-in service routes point at.
    pub upstream_host: String,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Explicit proxy routes. Empty means the built-in services.
    pub routes: Vec<RouteConfig>,

    /// Static dashboard assets.
    pub static_files: StaticFilesConfig,

    /// Body buffering limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upstream_host: "localhost".to_string(),
            listener: ListenerConfig::default(),
            routes: Vec::new(),
            static_files: StaticFilesConfig::default(),
            limits: LimitsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Routes in match order: the explicit list, or the built-in services
    /// against `upstream_host` when none are configured.
    pub fn prefix_routes(&self) -> Vec<RouteConfig> {
        if !self.routes.is_empty() {
            return self.routes.clone();
        }

        BUILTIN_SERVICES
            .iter()
            .map(|(name, prefix, port)| RouteConfig {
                name: (*name).to_string(),
                prefix: (*prefix).to_string(),
                upstream: format!("http://{}:{}/", self.upstream_host, port),
            })
            .collect()
    }

    /// Replace the port of the bind address, keeping its host part.
    pub fn set_port(&mut self, port: u16) {
        let host = match self.listener.bind_address.rsplit_once(':') {
            Some((host, _)) => host.to_string(),
            None => self.listener.bind_address.clone(),
        };
        self.listener.bind_address = format!("{}:{}", host, port);
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3333").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3333".to_string(),
        }
    }
}

/// A path prefix forwarded to an upstream base URL.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// Literal path prefix to match, e.g. "/api/vector/".
    pub prefix: String,

    /// Upstream base URL the remainder of the path is appended to.
    pub upstream: String,
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for requests no route handles. Relative paths are
    /// resolved against the config file's directory, or the working
    /// directory when there is no file.
    pub root: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: "dashboard".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum buffered body size in bytes, inbound and upstream.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024 * 1024, // 16MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
