//! Configuration file discovery and generation.
//!
//! The file is looked up in this order:
//!
//! 1. `./book-connect.toml`
//! 2. `<config dir>/book-connect/config.toml` (e.g. `~/.config/book-connect/config.toml`)
//!
//! # Configuration File Format
//!
//! ```toml
//! [catalog]
//! path = "books.json"
//! page_size = 36
//! integrity = "strict"
//!
//! [display]
//! theme = "system"
//!
//! [logging]
//! level = "warn"
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use super::Config;

const LOCAL_FILE_NAME: &str = "book-connect.toml";
const APP_DIR: &str = "book-connect";

/// Path of the per-user configuration file, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Find the first existing configuration file
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|path| path.is_file())
}

/// Write the default configuration to `path`
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_default(path: &Path, force: bool) -> Result<(), ConfigFileError> {
    if path.exists() && !force {
        return Err(ConfigFileError::Exists(path.to_path_buf()));
    }

    let content = toml::to_string_pretty(&Config::default())
        .map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    Exists(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, ThemePreference};
    use tempfile::tempdir;

    #[test]
    fn test_write_default_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default(&path, false).unwrap();
        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.catalog.page_size.get(), 36);
        assert_eq!(config.display.theme, ThemePreference::System);
    }

    #[test]
    fn test_write_default_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine").unwrap();

        let result = write_default(&path, false);
        assert!(matches!(result, Err(ConfigFileError::Exists(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_default(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("page_size"));
    }

    #[test]
    fn test_default_config_path_has_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("book-connect/config.toml"));
        }
    }
}
