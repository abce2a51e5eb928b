//! Configuration file handling
//!
//! The file lives at `~/.config/precache/config.toml` unless `--config` or
//! `PRECACHE_CONFIG` names another one. A config whose origin and scope do
//! not form a valid scope URL is rejected on load and never written.

pub mod schema;

pub use schema::Config;

use crate::error::{PrecacheError, PrecacheResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Loads and saves the precache config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for the default config file
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Manager for an explicit config file
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Manager for the `--config` argument, or the default file without one
    pub fn from_cli(path: Option<PathBuf>) -> Self {
        path.map_or_else(Self::new, Self::with_path)
    }

    /// `<user config dir>/precache/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("precache")
            .join("config.toml")
    }

    /// Load the config file; a missing file yields the defaults
    pub async fn load(&self) -> PrecacheResult<Config> {
        if !self.config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Parse and validate a config file
    pub async fn load_from_file(&self, path: &Path) -> PrecacheResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| PrecacheError::io(format!("reading config from {}", path.display()), e))?;

        let config: Config = toml::from_str(&content).map_err(|e| PrecacheError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        validate(&config, path)?;

        debug!(
            "Loaded config from {} (origin {}, scope {})",
            path.display(),
            config.precache.origin,
            config.precache.scope
        );
        Ok(config)
    }

    /// Validate and write the config file, creating its directory
    pub async fn save(&self, config: &Config) -> PrecacheResult<()> {
        validate(config, &self.config_path)?;
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            PrecacheError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    async fn ensure_config_dir(&self) -> PrecacheResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PrecacheError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Origin and scope must combine into a usable scope URL
fn validate(config: &Config, path: &Path) -> PrecacheResult<()> {
    config
        .precache
        .scope()
        .map(|_| ())
        .map_err(|e| PrecacheError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
