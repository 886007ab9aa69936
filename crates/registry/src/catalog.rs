//! The merged, read-only plugin catalog

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::plugin::{Plugin, PluginRegistry, PluginStatus};
use crate::repo::SourceHost;

/// Ordered plugin catalog: registry entries first, then the fallback entries.
///
/// Built once per build and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    description: String,
    plugins: Vec<Plugin>,
}

impl Catalog {
    /// Merge a fetched registry with the fallback entries.
    ///
    /// Registry entries are trimmed, stamped `available`, and dropped when
    /// their id is empty or repeats an earlier registry id. Fallback entries
    /// are appended as given, even when their id collides with a registry id.
    pub fn build(registry: PluginRegistry, fallback: Vec<Plugin>, host: &SourceHost) -> Self {
        let mut seen = HashSet::new();
        let mut plugins = Vec::with_capacity(registry.plugins.len() + fallback.len());

        for entry in registry.plugins {
            let mut plugin = Plugin::from(entry);
            plugin.id = plugin.id.trim().to_string();
            plugin.repo = plugin.repo.trim().to_string();

            if plugin.id.is_empty() {
                warn!("Dropping registry plugin {:?} with an empty id", plugin.name);
                continue;
            }

            if !seen.insert(plugin.id.clone()) {
                warn!("Dropping duplicate registry plugin id: {}", plugin.id);
                continue;
            }

            if plugin.has_repo() && host.repo_ref(&plugin.repo).is_none() {
                warn!(
                    "Plugin {} has a repository URL that is not on {}: {}",
                    plugin.id, host.browse_host, plugin.repo
                );
            }

            plugins.push(plugin);
        }

        debug!("Registry contributed {} plugins", plugins.len());

        for plugin in fallback {
            if seen.contains(&plugin.id) {
                warn!("Coming-soon plugin {} is also listed by the registry", plugin.id);
            }
            plugins.push(plugin);
        }

        Self {
            description: registry.description,
            plugins,
        }
    }

    /// Registry description, empty when the registry was unavailable
    pub fn description(&self) -> &str {
        &self.description
    }

    /// All entries in catalog order
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Registry entries flagged `featured`, in registry order
    pub fn featured(&self) -> Vec<&Plugin> {
        self.plugins
            .iter()
            .filter(|p| p.is_available() && p.featured)
            .collect()
    }

    /// First entry with the given id
    pub fn get_plugin(&self, id: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Ids in catalog order
    pub fn list_ids(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn with_status(&self, status: PluginStatus) -> Vec<&Plugin> {
        self.plugins.iter().filter(|p| p.status == status).collect()
    }

    pub fn available(&self) -> Vec<&Plugin> {
        self.with_status(PluginStatus::Available)
    }

    pub fn coming_soon(&self) -> Vec<&Plugin> {
        self.with_status(PluginStatus::ComingSoon)
    }
}
