//! Resolves the plugin catalog once per build

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::fallback::coming_soon_plugins;
use crate::plugin::PluginRegistry;
use crate::repo::SourceHost;
use crate::source::RegistrySource;

/// Loads the catalog from a registry source and memoizes the result.
///
/// A registry that cannot be fetched or decoded is treated as empty, so the
/// catalog always resolves.
pub struct RegistryResolver {
    source: Box<dyn RegistrySource>,
    host: SourceHost,
    catalog: OnceCell<Arc<Catalog>>,
}

impl RegistryResolver {
    pub fn new(source: Box<dyn RegistrySource>) -> Self {
        Self::with_host(source, SourceHost::default())
    }

    pub fn with_host(source: Box<dyn RegistrySource>, host: SourceHost) -> Self {
        Self {
            source,
            host,
            catalog: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &str {
        self.source.location()
    }

    /// The merged catalog. Only the first call touches the registry source.
    pub async fn load_catalog(&self) -> Arc<Catalog> {
        self.catalog
            .get_or_init(|| async { Arc::new(self.resolve().await) })
            .await
            .clone()
    }

    async fn resolve(&self) -> Catalog {
        info!("Loading plugin catalog from {}", self.source.location());

        let registry = match self.source.fetch().await {
            Ok(registry) => registry,
            Err(e) => {
                warn!(
                    "Failed to fetch plugin registry from {}: {}",
                    self.source.location(),
                    e
                );
                PluginRegistry::default()
            }
        };

        let catalog = Catalog::build(registry, coming_soon_plugins(), &self.host);

        info!(
            "Catalog resolved: {} available, {} coming soon",
            catalog.available().len(),
            catalog.coming_soon().len()
        );

        catalog
    }
}
