//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (body limit > 0, bind address parses)
//! - Detect duplicate and shadowed route prefixes
//! - Check upstream URLs are plain-HTTP absolute URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DashboardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::DashboardConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("no proxy routes configured")]
    NoRoutes,

    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),

    #[error("route `{0}` prefix must start with `/`")]
    PrefixNotAbsolute(String),

    #[error("route `{route}` duplicates prefix `{prefix}`")]
    DuplicatePrefix { route: String, prefix: String },

    #[error("route `{route}` is unreachable: prefix `{prefix}` is shadowed by route `{shadowed_by}`")]
    ShadowedPrefix {
        route: String,
        prefix: String,
        shadowed_by: String,
    },

    #[error("route `{route}` upstream `{upstream}` is not a valid URL: {reason}")]
    InvalidUpstream {
        route: String,
        upstream: String,
        reason: String,
    },

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("static_files.root must not be empty")]
    EmptyStaticRoot,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &DashboardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let routes = config.prefix_routes();
    if routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    for (index, route) in routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName(index));
        }

        if !route.prefix.starts_with('/') {
            errors.push(ValidationError::PrefixNotAbsolute(route.name.clone()));
        }

        // First match wins, so any earlier prefix of this one hides it.
        if let Some(earlier) = routes[..index]
            .iter()
            .find(|earlier| route.prefix.starts_with(earlier.prefix.as_str()))
        {
            if earlier.prefix == route.prefix {
                errors.push(ValidationError::DuplicatePrefix {
                    route: route.name.clone(),
                    prefix: route.prefix.clone(),
                });
            } else {
                errors.push(ValidationError::ShadowedPrefix {
                    route: route.name.clone(),
                    prefix: route.prefix.clone(),
                    shadowed_by: earlier.name.clone(),
                });
            }
        }

        if let Err(reason) = check_upstream(&route.upstream) {
            errors.push(ValidationError::InvalidUpstream {
                route: route.name.clone(),
                upstream: route.upstream.clone(),
                reason,
            });
        }
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.static_files.root.trim().is_empty() {
        errors.push(ValidationError::EmptyStaticRoot);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream(upstream: &str) -> Result<(), String> {
    let url = Url::parse(upstream).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(name: &str, prefix: &str, upstream: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            prefix: prefix.into(),
            upstream: upstream.into(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&DashboardConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DashboardConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.limits.max_body_bytes = 0;
        config.static_files.root = " ".into();
        config.routes.push(route("bad", "api/", "ftp://host/"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::BindAddress("not-an-address".into())));
        assert!(errors.contains(&ValidationError::PrefixNotAbsolute("bad".into())));
        assert!(errors.contains(&ValidationError::ZeroBodyLimit));
        assert!(errors.contains(&ValidationError::EmptyStaticRoot));
        assert!(matches!(
            errors.iter().find(|e| matches!(e, ValidationError::InvalidUpstream { .. })),
            Some(ValidationError::InvalidUpstream { route, .. }) if route == "bad"
        ));
    }

    #[test]
    fn test_rejects_duplicate_and_shadowed_prefixes() {
        let mut config = DashboardConfig::default();
        config.routes = vec![
            route("api", "/api/", "http://localhost:1/"),
            route("again", "/api/", "http://localhost:2/"),
            route("vector", "/api/vector/", "http://localhost:3/"),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicatePrefix {
                    route: "again".into(),
                    prefix: "/api/".into(),
                },
                ValidationError::ShadowedPrefix {
                    route: "vector".into(),
                    prefix: "/api/vector/".into(),
                    shadowed_by: "api".into(),
                },
            ]
        );
    }

    #[test]
    fn test_longer_prefix_first_is_allowed() {
        let mut config = DashboardConfig::default();
        config.routes = vec![
            route("vector", "/api/vector/", "http://localhost:3/"),
            route("api", "/api/", "http://localhost:1/"),
        ];
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_upstream_without_host_is_rejected() {
        let mut config = DashboardConfig::default();
        config.routes = vec![route("odd", "/odd/", "http://")];
        assert!(matches!(
            validate_config(&config).unwrap_err().as_slice(),
            [ValidationError::InvalidUpstream { .. }]
        ));
    }
}
