//! Plugin registry resolution for the Treeline site
//!
//! Fetches the remote plugin registry, merges it with the hardcoded
//! "coming soon" entries and exposes the resulting catalog.

pub mod catalog;
pub mod error;
pub mod fallback;
pub mod plugin;
pub mod repo;
pub mod resolver;
pub mod source;

pub use catalog::Catalog;
pub use error::{RegistryError, RegistryResult};
pub use fallback::coming_soon_plugins;
pub use plugin::{Plugin, PluginRegistry, PluginStatus, RegistryPlugin};
pub use repo::{preview_document_url, RepoRef, SourceHost};
pub use resolver::RegistryResolver;
pub use source::{
    HttpRegistrySource, RegistrySource, StaticRegistrySource, DEFAULT_REGISTRY_URL,
    DEFAULT_TIMEOUT_SECS,
};
