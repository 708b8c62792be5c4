//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::DashboardConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Command-line values applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub static_root: Option<String>,
    pub upstream_host: Option<String>,
}

impl Overrides {
    pub fn apply(self, config: &mut DashboardConfig) {
        if let Some(port) = self.port {
            config.set_port(port);
        }
        if let Some(root) = self.static_root {
            config.static_files.root = root;
        }
        if let Some(host) = self.upstream_host {
            config.upstream_host = host;
        }
    }
}

/// Parse configuration from TOML text. Semantic checks are left to
/// `validate_config`.
pub fn parse_config(content: &str) -> Result<DashboardConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from a TOML file.
///
/// A relative `static_files.root` is taken relative to the file's directory.
pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;

    let root = Path::new(&config.static_files.root);
    if !config.static_files.root.is_empty() && root.is_relative() {
        if let Some(dir) = path.parent() {
            let resolved: PathBuf = dir.join(root);
            config.static_files.root = resolved.to_string_lossy().into_owned();
        }
    }
    Ok(config)
}

/// Load the given file, or fall back to the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(DashboardConfig::default()),
    }
}

/// Load, apply command-line overrides, then validate once.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: Overrides,
) -> Result<DashboardConfig, ConfigError> {
    let mut config = load_or_default(path)?;
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
