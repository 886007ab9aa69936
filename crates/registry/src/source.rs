//! Where the registry document comes from

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::plugin::PluginRegistry;

/// Registry published alongside the Treeline releases
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/treeline-money/treeline-releases/main/plugins.json";

/// Upper bound on a single registry fetch
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// A source of the registry document
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Human-readable location, used in logs and snapshots
    fn location(&self) -> &str;

    /// Fetch and decode the registry document
    async fn fetch(&self) -> RegistryResult<PluginRegistry>;
}

/// Fetches the registry over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpRegistrySource {
    client: reqwest::Client,
    url: String,
}

impl HttpRegistrySource {
    /// Create a source with its own client
    pub fn new(url: impl Into<String>, timeout: Duration, user_agent: &str) -> RegistryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::Client(e.to_string()))?;

        Ok(Self::with_client(client, url))
    }

    /// Create a source that shares an existing client
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RegistrySource for HttpRegistrySource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> RegistryResult<PluginRegistry> {
        debug!("Fetching plugin registry: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(PluginRegistry::from_slice(&body)?)
    }
}

/// An in-memory registry, used for offline builds
#[derive(Debug, Clone, Default)]
pub struct StaticRegistrySource {
    registry: PluginRegistry,
}

impl StaticRegistrySource {
    pub fn new(registry: PluginRegistry) -> Self {
        Self { registry }
    }

    /// A source with no registry entries at all
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrySource for StaticRegistrySource {
    fn location(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> RegistryResult<PluginRegistry> {
        Ok(self.registry.clone())
    }
}
