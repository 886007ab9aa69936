//! Plugin records and the registry wire schema

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Availability of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginStatus {
    /// Published in the remote registry
    Available,

    /// Announced locally, no implementation yet
    ComingSoon,
}

impl PluginStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginStatus::Available => "available",
            PluginStatus::ComingSoon => "coming-soon",
        }
    }
}

impl fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    /// Stable slug, unique within the catalog
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-text summary
    pub description: String,

    /// Display attribution, absent in older registry revisions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Source repository URL, empty when there is no implementation yet
    pub repo: String,

    /// Whether the entry belongs to the featured subset
    pub featured: bool,

    /// Availability, assigned locally
    pub status: PluginStatus,
}

impl Plugin {
    pub fn is_available(&self) -> bool {
        self.status == PluginStatus::Available
    }

    pub fn has_repo(&self) -> bool {
        !self.repo.is_empty()
    }
}

impl From<RegistryPlugin> for Plugin {
    fn from(entry: RegistryPlugin) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            author: entry.author,
            repo: entry.repo,
            featured: entry.featured,
            status: PluginStatus::Available,
        }
    }
}

/// A plugin as published in the remote registry (no status).
///
/// Only `id` is strict. Every other field falls back to its default when it
/// is missing, null, or of an unexpected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryPlugin {
    pub id: String,

    /// Empty on the wire means "use the id"
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(
        default,
        deserialize_with = "lenient_author",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub repo: String,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: bool,
}

/// The remote registry document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRegistry {
    pub description: String,
    pub plugins: Vec<RegistryPlugin>,
}

impl PluginRegistry {
    /// Decode a registry body.
    ///
    /// The body must be a JSON object. Everything inside it is tolerated:
    /// a missing or non-array `plugins` yields no entries, and entries that
    /// fail to decode are skipped.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice(body)? {
            Value::Object(document) => Ok(Self::from_document(document)),
            _ => Err(serde_json::Error::custom(
                "registry document is not a JSON object",
            )),
        }
    }

    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        Self::from_slice(body.as_bytes())
    }

    fn from_document(mut document: Map<String, Value>) -> Self {
        let description = document
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let entries = match document.remove("plugins").unwrap_or(Value::Null) {
            Value::Array(entries) => entries,
            Value::Null => Vec::new(),
            other => {
                warn!("Registry `plugins` is not an array, ignoring: {}", other);
                Vec::new()
            }
        };

        let mut plugins = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<RegistryPlugin>(entry) {
                Ok(mut plugin) => {
                    if plugin.name.trim().is_empty() {
                        plugin.name = plugin.id.trim().to_string();
                    }
                    plugins.push(plugin);
                }
                Err(e) => warn!("Skipping malformed registry entry #{}: {}", index, e),
            }
        }

        Self {
            description,
            plugins,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(v) => v,
        Value::Number(v) => v.to_string(),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn lenient_author<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
