//! Prefix mapping lookup.
//!
//! # Responsibilities
//! - Store the ordered (prefix, upstream) pairs
//! - Resolve a raw request path to the upstream URL it forwards to
//! - Return an explicit no-match rather than a silent default
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan in declared order; first match wins

use crate::config::RouteConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// One entry of the prefix mapping.
#[derive(Debug, Clone)]
pub struct PrefixRoute {
    pub name: String,
    matcher: PathPrefixMatcher,
    upstream: String,
}

impl PrefixRoute {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, upstream: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher: PathPrefixMatcher::new(prefix),
            upstream: upstream.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }
}

/// A path resolved against the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget<'a> {
    /// Name of the matched route.
    pub route: &'a str,
    /// The path with the matched prefix removed.
    pub downstream_path: &'a str,
    /// Upstream base URL followed by the downstream path.
    pub url: String,
}

/// Ordered prefix → upstream table, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct PrefixMapping {
    routes: Vec<PrefixRoute>,
}

impl PrefixMapping {
    pub fn new(routes: Vec<PrefixRoute>) -> Self {
        Self { routes }
    }

    /// Compile routes from configuration, preserving their order.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        Self::new(
            routes
                .iter()
                .map(|r| PrefixRoute::new(&r.name, &r.prefix, &r.upstream))
                .collect(),
        )
    }

    pub fn routes(&self) -> &[PrefixRoute] {
        &self.routes
    }

    /// Find the first route whose prefix starts `path` and build its target URL.
    pub fn resolve<'a>(&'a self, path: &'a str) -> Option<RouteTarget<'a>> {
        self.routes.iter().find_map(|route| {
            route.matcher.strip(path).map(|downstream_path| RouteTarget {
                route: &route.name,
                downstream_path,
                url: format!("{}{}", route.upstream, downstream_path),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    fn default_mapping() -> PrefixMapping {
        PrefixMapping::from_config(&DashboardConfig::default().prefix_routes())
    }

    #[test]
    fn test_every_builtin_prefix_maps_suffix_verbatim() {
        let mapping = default_mapping();
        let suffixes = ["", "_cluster/health", "a b/%2F?x=1&y=%C3%A9", "deep/ly/nested/"];

        for route in mapping.routes() {
            for suffix in suffixes {
                let path = format!("{}{}", route.prefix(), suffix);
                let target = mapping.resolve(&path).unwrap();
                assert_eq!(target.route, route.name);
                assert_eq!(target.downstream_path, suffix);
                assert_eq!(target.url, format!("{}{}", route.upstream(), suffix));
            }
        }
    }

    #[test]
    fn test_concrete_targets() {
        let mapping = default_mapping();

        let target = mapping.resolve("/api/opensearch/_search?size=10").unwrap();
        assert_eq!(target.url, "http://localhost:9200/_search?size=10");

        let target = mapping.resolve("/api/airflow/api/v1/dags").unwrap();
        assert_eq!(target.url, "http://localhost:28080/api/v1/dags");
    }

    #[test]
    fn test_no_match() {
        let mapping = default_mapping();
        assert!(mapping.resolve("/").is_none());
        assert!(mapping.resolve("/index.html").is_none());
        assert!(mapping.resolve("/api/feast").is_none());
        assert!(mapping.resolve("/api/unknown/x").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let mapping = PrefixMapping::new(vec![
            PrefixRoute::new("specific", "/api/v/", "http://a/"),
            PrefixRoute::new("broad", "/api/", "http://b/"),
        ]);

        assert_eq!(mapping.resolve("/api/v/x").unwrap().url, "http://a/x");
        assert_eq!(mapping.resolve("/api/w/x").unwrap().url, "http://b/w/x");

        let reversed = PrefixMapping::new(mapping.routes().iter().rev().cloned().collect());
        assert_eq!(reversed.resolve("/api/v/x").unwrap().route, "broad");
    }
}
