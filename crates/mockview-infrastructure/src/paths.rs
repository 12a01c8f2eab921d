//! Unified path management for Mockview files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mockview/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/mockview/     # Data directory
//! ├── interviews/              # One JSON document per archived session
//! └── logs/                    # Application logs
//!     └── mockview.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "mockview";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for mockview_core::InterviewError {
    fn from(err: PathError) -> Self {
        mockview_core::InterviewError::config(err.to_string())
    }
}

/// Platform-specific locations, resolved with `dirs`.
pub struct MockviewPaths;

impl MockviewPaths {
    /// Returns the configuration directory (e.g. `~/.config/mockview/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/mockview/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default interview archive directory.
    pub fn archive_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("interviews"))
    }

    /// Returns the log directory.
    pub fn log_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
