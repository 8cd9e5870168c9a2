//! Configuration loading for quill
//!
//! The config file is optional. Without one the store lives in the standard
//! data directory under the default database name.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::Paths;

/// quill configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Document store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Where the document store lives
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding database files (defaults to the quill data dir)
    pub data_dir: Option<PathBuf>,

    /// Database name, used as the file stem
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "blog".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database: default_database(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields defaults; a file that exists but cannot be read
    /// or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| Paths::new().config_file());

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {:?}", config_path))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Full path of the database file this config points at
    pub fn database_path(&self) -> PathBuf {
        let data_dir = self
            .store
            .data_dir
            .clone()
            .unwrap_or_else(|| Paths::new().data);
        Paths::database_file(&data_dir, &self.store.database)
    }
}
