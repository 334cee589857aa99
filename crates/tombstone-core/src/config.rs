//! Application configuration.
//!
//! ```ignore
//! use tombstone_core::TombstoneConfig;
//!
//! let config = TombstoneConfig::builder()
//!     .settings_path("my_settings.json")
//!     .build();
//! let mut ctx = config.open_context()?;
//! ```

use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::game::GameContext;
use crate::settings::{FileBackend, SettingsStore};

/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Configuration for a tombstoning application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TombstoneConfig {
    /// JSON file holding persisted settings
    pub settings_path: PathBuf,
    /// Treat a launch as a resume when a saved game is still active
    pub resume_on_launch: bool,
}

impl Default for TombstoneConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            resume_on_launch: true,
        }
    }
}

impl TombstoneConfig {
    /// Create a new configuration builder
    pub fn builder() -> TombstoneConfigBuilder {
        TombstoneConfigBuilder::default()
    }

    /// Open the settings file and wrap it in a fresh game context
    pub fn open_context(&self) -> Result<GameContext<FileBackend>> {
        debug!("Opening settings at {}", self.settings_path.display());
        let backend = FileBackend::open(&self.settings_path)?;
        Ok(GameContext::new(SettingsStore::new(backend)))
    }
}

/// `<data dir>/tombstone/settings.json`, or `settings.json` in the working
/// directory when the platform has no data directory
pub fn default_settings_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("tombstone").join(SETTINGS_FILE),
        None => PathBuf::from(SETTINGS_FILE),
    }
}

/// Builder for TombstoneConfig
#[derive(Debug, Clone, Default)]
pub struct TombstoneConfigBuilder {
    settings_path: Option<PathBuf>,
    resume_on_launch: Option<bool>,
}

impl TombstoneConfigBuilder {
    /// Set the settings file path
    pub fn settings_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn resume_on_launch(mut self, enabled: bool) -> Self {
        self.resume_on_launch = Some(enabled);
        self
    }

    /// Build the configuration
    pub fn build(self) -> TombstoneConfig {
        TombstoneConfig {
            settings_path: self.settings_path.unwrap_or_else(default_settings_path),
            resume_on_launch: self.resume_on_launch.unwrap_or(true),
        }
    }
}
