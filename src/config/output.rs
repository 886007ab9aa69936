//! Output locations for generated site data

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::TreelineSiteError;

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where `export` writes the catalog snapshot. `~` and `$VARS` are expanded.
    pub snapshot_path: PathBuf,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(TreelineSiteError::Config("Snapshot path cannot be empty".into()).into());
        }
        Ok(())
    }

    /// Snapshot path with `~` and environment variables expanded
    pub fn expanded_snapshot_path(&self) -> Result<PathBuf> {
        let raw = self.snapshot_path.to_string_lossy();
        let expanded = shellexpand::full(&raw)
            .map_err(|e| anyhow!("Failed to expand snapshot path {}: {}", raw, e))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("./src/data/plugins.snapshot.json"),
        }
    }
}
