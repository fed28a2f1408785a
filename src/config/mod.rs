//! Configuration management.
//!
//! Settings are layered: built-in defaults, then the TOML file, then
//! environment variables prefixed with `BOOK_CONNECT_` (nested keys are
//! separated by `__`, e.g. `BOOK_CONNECT_CATALOG__PAGE_SIZE=12`).

mod file_config;

pub use file_config::{default_config_path, find_config_file, write_default, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog source and paging
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How broken references in the catalog are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityMode {
    /// Fail on the first unknown author or genre
    #[default]
    Strict,
    /// Log the defect and render a placeholder instead
    Lenient,
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog JSON file; the embedded sample catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Number of previews revealed per page
    #[serde(default = "default_page_size")]
    pub page_size: NonZeroUsize,

    /// Treatment of unknown author/genre references
    #[serde(default)]
    pub integrity: IntegrityMode,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            page_size: default_page_size(),
            integrity: IntegrityMode::default(),
        }
    }
}

/// Books revealed per page when nothing is configured
pub const DEFAULT_PAGE_SIZE: usize = 36;

fn default_page_size() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN)
}

/// Theme to start with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Day,
    Night,
    /// Follow the terminal's colour scheme
    #[default]
    System,
}

impl ThemePreference {
    /// Resolve to a concrete theme, consulting the terminal for `System`
    pub fn resolve(self) -> Theme {
        match self {
            ThemePreference::Day => Theme::Day,
            ThemePreference::Night => Theme::Night,
            ThemePreference::System => Theme::from_system(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub theme: ThemePreference,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Load configuration from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    load_layered(path, environment())
}

/// `BOOK_CONNECT_<SECTION>__<KEY>` variables
fn environment() -> config::Environment {
    config::Environment::with_prefix("BOOK_CONNECT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Defaults, then the file, then `env` on top
fn load_layered(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    builder.add_source(env).build()?.try_deserialize()
}
