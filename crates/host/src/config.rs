//! Configuration system for gridfeed
//!
//! Reads config from ~/.config/gridfeed/config.toml

use std::path::{Path, PathBuf};

use anyhow::Context;
use gridfeed_core::GridConfig;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http_port: u16,
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            bind: "127.0.0.1".to_string(),
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    /// Handed to the page through `/config.js`
    pub grid: GridConfig,
}

impl Config {
    /// Load configuration from default path, falling back to defaults
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_config_path();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridfeed")
            .join("config.toml")
    }

    /// Load and validate a specific file
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.grid.validate()?;
        Ok(config)
    }

    /// Create default config file if it doesn't exist
    pub fn create_default_if_missing() -> anyhow::Result<()> {
        let path = Self::default_config_path();
        if path.exists() {
            return Ok(());
        }
        Self::write_default(&path)
    }

    pub fn write_default(path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let body = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, format!("# gridfeed Configuration\n\n{body}"))
            .with_context(|| format!("writing {}", path.display()))
    }
}
