//! Dashboard configuration.
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `BHOOMI_*` environment variables. Later layers win field by field.
//!
//! | Variable                  | Overrides                  |
//! |---------------------------|----------------------------|
//! | `BHOOMI_LANDING`          | `surface.landing`          |
//! | `BHOOMI_SIGN_IN`          | `surface.sign_in`          |
//! | `BHOOMI_REGISTER`         | `surface.register`         |
//! | `BHOOMI_PROTECTED_PREFIX` | `surface.protected_prefix` |
//! | `BHOOMI_MOBILE_BREAKPOINT`| `shell.mobile_breakpoint`  |
//! | `BHOOMI_INITIAL_WIDTH`    | `shell.initial_width`      |

use std::path::{Path, PathBuf};

use bhoomi_routes::PublicSurface;
use bhoomi_shell::ShellConfig;
use bhoomi_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Everything the dashboard reads from the outside at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Public paths and the protected prefix.
    pub surface: PublicSurface,
    /// Viewport and sidebar tuning.
    pub shell: ShellConfig,
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The named config file could not be read.
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("failed to parse config file {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An override variable is set but unusable.
    #[error("invalid environment variable {name}: {message}")]
    InvalidEnvVar { name: String, message: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        ConfigError::ParseToml {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::ReadFile { .. } => "CONFIG_READ_FILE",
            ConfigError::ParseToml { .. } => "CONFIG_PARSE_TOML",
            ConfigError::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Startup input the operator has to fix.
        false
    }
}

/// Builder that assembles a [`DashboardConfig`] from its layers.
#[derive(Debug)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    skip_env_vars: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file: None,
            skip_env_vars: false,
        }
    }

    /// Read this TOML file as the middle layer. The path was named
    /// explicitly, so a missing file is an error rather than a skip.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Ignore `BHOOMI_*` variables. For tests that need isolation from
    /// the ambient environment.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env_vars = true;
        self
    }

    pub fn load(&self) -> Result<DashboardConfig, ConfigError> {
        let mut config = match &self.file {
            Some(path) => load_file(path)?,
            None => DashboardConfig::default(),
        };
        if !self.skip_env_vars {
            apply_env_vars(&mut config)?;
        }
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_file(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let text =
        std::fs::read_to_string(path).map_err(|source| ConfigError::read_file(path, source))?;
    let config = toml::from_str(&text).map_err(|source| ConfigError::parse_toml(path, source))?;
    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

fn apply_env_vars(config: &mut DashboardConfig) -> Result<(), ConfigError> {
    if let Some(path) = env_path("BHOOMI_LANDING") {
        config.surface.landing = path;
    }
    if let Some(path) = env_path("BHOOMI_SIGN_IN") {
        config.surface.sign_in = path;
    }
    if let Some(path) = env_path("BHOOMI_REGISTER") {
        config.surface.register = path;
    }
    if let Some(path) = env_path("BHOOMI_PROTECTED_PREFIX") {
        config.surface.protected_prefix = path;
    }
    if let Some(width) = env_u32("BHOOMI_MOBILE_BREAKPOINT")? {
        config.shell.mobile_breakpoint = width;
    }
    if let Some(width) = env_u32("BHOOMI_INITIAL_WIDTH")? {
        config.shell.initial_width = width;
    }
    Ok(())
}

/// Paths normalize on parse, so any string value is accepted.
fn env_path(name: &str) -> Option<bhoomi_routes::RoutePath> {
    std::env::var(name)
        .ok()
        .map(|value| bhoomi_routes::RoutePath::parse(&value))
}

fn env_u32(name: &str) -> Result<Option<u32>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::invalid_env_var(name, format!("expected a width, got '{value}'"))),
        Err(_) => Ok(None),
    }
}
