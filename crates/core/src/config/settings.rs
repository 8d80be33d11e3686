//! Persistence for user settings in `.sitecraft/settings.toml`.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::CONFIG_DIR;
use sc_protocol::config_models::Settings;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `<root>/.sitecraft/settings.toml`.
    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join(CONFIG_DIR).join("settings.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, returning defaults when the file does not exist.
    pub fn load(&self) -> ConfigResult<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::FileRead {
            path: self.path.clone(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write settings, creating the parent directory if needed.
    pub fn save(&self, settings: &Settings) -> ConfigResult<()> {
        let content = toml::to_string(settings).map_err(|source| ConfigError::TomlSerialize {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| ConfigError::FileWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
