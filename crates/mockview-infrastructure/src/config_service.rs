//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/mockview/config.toml` and
//! caches it for the lifetime of the process.

use crate::paths::MockviewPaths;
use crate::storage::AtomicFile;
use mockview_core::config::RootConfig;
use mockview_core::{InterviewError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform config file.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(MockviewPaths::config_file()?))
    }

    /// Creates a service reading a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing or empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file exists but cannot be read or parsed.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| InterviewError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self
                .config
                .write()
                .map_err(|_| InterviewError::internal("config cache lock poisoned"))?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Writes the default configuration unless the file already exists.
    ///
    /// # Returns
    ///
    /// `true` if a file was written.
    pub fn write_default(&self) -> Result<bool> {
        let file = AtomicFile::<RootConfig>::toml(self.path.clone());
        if self.path.exists() {
            return Ok(false);
        }
        file.save(&RootConfig::default())?;
        tracing::info!("Wrote default configuration to {}", self.path.display());
        Ok(true)
    }

    fn load_config(&self) -> Result<RootConfig> {
        let file = AtomicFile::<RootConfig>::toml(self.path.clone());
        match file.load() {
            Ok(Some(config)) => {
                tracing::debug!("Loaded configuration from {}", self.path.display());
                Ok(config)
            }
            Ok(None) => {
                tracing::debug!(
                    "No configuration at {}, using defaults",
                    self.path.display()
                );
                Ok(RootConfig::default())
            }
            Err(e) => Err(InterviewError::config(format!(
                "Failed to load {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
