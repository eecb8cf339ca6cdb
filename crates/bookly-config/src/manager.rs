use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{Config, ConfigError};

/// Reads and writes [`Config`] as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Lays out `<base>/config/config.json`, creating the directories.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join("config.json")))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the stored config, or the defaults when nothing has been saved yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config on disk; using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
    }

    /// Writes `<path>.tmp` next to the target, then renames it into place.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;

        let mut staged = OsString::from(self.config_path.as_os_str());
        staged.push(".tmp");
        let staged = PathBuf::from(staged);

        fs::write(&staged, json)?;
        fs::rename(&staged, &self.config_path)?;
        debug!(path = %self.config_path.display(), "saved config");
        Ok(())
    }
}
