//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, static root made relative to the file)
//!     → command line overrides (port, static root, upstream host)
//!     → validation.rs (semantic checks, once)
//!     → DashboardConfig (validated, immutable)
//!     → prefix mapping + server built from it once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so the server runs without a file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, resolve_config, ConfigError, Overrides};
pub use schema::DashboardConfig;
pub use schema::ListenerConfig;
pub use schema::RouteConfig;
pub use validation::{validate_config, ValidationError};
