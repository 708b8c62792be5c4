//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path (with query string)
//!     → router.rs (ordered prefix scan)
//!     → matcher.rs (literal prefix test, strip)
//!     → Return: RouteTarget { url = upstream + remainder } or no match
//!
//! Route Compilation (at startup):
//!     RouteConfig[] (declared order)
//!     → PrefixRoute[]
//!     → Freeze as immutable PrefixMapping
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declared order)

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{PrefixMapping, PrefixRoute, RouteTarget};
