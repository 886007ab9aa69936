//! Catalog snapshots consumed by the site build

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils;
use crate::{Catalog, Plugin, TreelineSiteError, TreelineSiteResult};

/// The resolved catalog as written to disk for the page templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,

    /// Version of the tool that wrote it
    pub tool_version: String,

    /// Where the registry was read from
    pub registry_url: String,

    /// Registry description, empty when the registry was unavailable
    pub description: String,

    /// Full catalog in order
    pub plugins: Vec<Plugin>,

    /// Ids of the featured subset, in order
    pub featured: Vec<String>,

    /// SHA256 of the serialized `plugins`
    pub checksum: String,
}

impl CatalogSnapshot {
    /// Capture a catalog
    pub fn from_catalog(catalog: &Catalog, registry_url: &str) -> Self {
        let plugins = catalog.plugins().to_vec();
        let featured = catalog.featured().iter().map(|p| p.id.clone()).collect();
        let checksum = Self::compute_checksum(&plugins);

        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            registry_url: registry_url.to_string(),
            description: catalog.description().to_string(),
            plugins,
            featured,
            checksum,
        }
    }

    /// Checksum over the compact JSON form of the plugins
    pub fn compute_checksum(plugins: &[Plugin]) -> String {
        // Serializing plain structs and strings cannot fail
        let canonical = serde_json::to_string(plugins).unwrap_or_default();
        utils::calculate_string_hash(&canonical)
    }

    /// Whether `checksum` still matches `plugins`
    pub fn verify(&self) -> bool {
        self.checksum == Self::compute_checksum(&self.plugins)
    }

    pub fn get_plugin(&self, id: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Load a snapshot, rejecting one whose checksum does not match
    pub fn from_file(path: &Path) -> TreelineSiteResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&content)?;

        if !snapshot.verify() {
            return Err(TreelineSiteError::Snapshot(format!(
                "Checksum mismatch in {:?}",
                path
            )));
        }

        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> TreelineSiteResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                utils::ensure_directory(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
