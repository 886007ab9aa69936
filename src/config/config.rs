//! Main configuration structure and implementation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{OutputConfig, RegistryConfig, SourceHost};
use crate::TreelineSiteError;

/// Supported configuration version
pub const CONFIG_VERSION: &str = "1.0";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Remote registry settings
    pub registry: RegistryConfig,

    /// Source-control host the plugin repositories live on
    pub host: SourceHost,

    /// Output configuration
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(TreelineSiteError::Config(format!(
                "Unsupported configuration version: {}",
                self.version
            ))
            .into());
        }

        self.registry.validate()?;
        validate_host(&self.host)?;
        self.output.validate()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            registry: RegistryConfig::default(),
            host: SourceHost::default(),
            output: OutputConfig::default(),
        }
    }
}

fn validate_host(host: &SourceHost) -> Result<()> {
    if host.scheme != "http" && host.scheme != "https" {
        return Err(TreelineSiteError::Config(format!(
            "host.scheme must be http or https: {}",
            host.scheme
        ))
        .into());
    }

    let fields = [
        ("browse_host", &host.browse_host),
        ("raw_host", &host.raw_host),
        ("branch", &host.branch),
    ];

    for (name, value) in fields {
        if value.is_empty() {
            return Err(TreelineSiteError::Config(format!("host.{} cannot be empty", name)).into());
        }
        if value.contains('/') {
            return Err(TreelineSiteError::Config(format!(
                "host.{} must not contain '/': {}",
                name, value
            ))
            .into());
        }
    }

    if host.preview_file.is_empty() {
        return Err(TreelineSiteError::Config("host.preview_file cannot be empty".into()).into());
    }

    Ok(())
}
