//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{error::Result, types::StudioConfig};

/// Environment variable prefix (`SKILLSTUDIO__SKILLS__CACHE_TTL_SECS=30`)
const ENV_PREFIX: &str = "SKILLSTUDIO";

/// Loads, validates and saves [`StudioConfig`]
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a manager reading the default config file location
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment prefix (mainly for tests)
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Path of the TOML file this manager reads
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skillstudio")
            .join("config.toml")
    }

    /// Load defaults, then the file (if present), then the environment
    pub fn load(&self) -> Result<StudioConfig> {
        debug!(path = %self.config_path.display(), "Loading configuration");

        let defaults = Config::try_from(&StudioConfig::default())?;
        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let studio: StudioConfig = config.try_deserialize()?;
        studio.validate()?;
        Ok(studio)
    }

    /// Write the configuration as TOML, creating the parent directory
    pub fn save(&self, config: &StudioConfig) -> Result<()> {
        config.validate()?;
        let toml = toml::to_string_pretty(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        debug!(path = %self.config_path.display(), "Saved configuration");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
