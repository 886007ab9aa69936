//! Treeline Site Library
//!
//! Build-time data for the Treeline website: resolves the plugin catalog from
//! the remote registry and prepares plugin preview documents for rendering.

pub mod cli;
pub mod config;
pub mod snapshot;
pub mod utils;

pub use config::{Config, OutputConfig, RegistryConfig, SourceHost};
pub use snapshot::CatalogSnapshot;
pub use treeline_markdown::MarkdownRewriter;
pub use treeline_registry::{
    Catalog, HttpRegistrySource, Plugin, PluginRegistry, PluginStatus, RegistryResolver,
    RegistrySource, StaticRegistrySource,
};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Main application context that coordinates all components
pub struct TreelineSite {
    config: Config,
    client: reqwest::Client,
    resolver: RegistryResolver,
    rewriter: MarkdownRewriter,
}

impl TreelineSite {
    /// Create a site context that fetches the configured registry
    pub fn new(config: Config) -> Result<Self> {
        let client = Self::build_client(&config)?;
        let source = HttpRegistrySource::with_client(client.clone(), config.registry.url.clone());
        Ok(Self::assemble(config, client, Box::new(source)))
    }

    /// Create a site context that skips the registry entirely
    pub fn offline(config: Config) -> Result<Self> {
        Self::with_source(config, Box::new(StaticRegistrySource::empty()))
    }

    /// Create a site context with a custom registry source
    pub fn with_source(config: Config, source: Box<dyn RegistrySource>) -> Result<Self> {
        let client = Self::build_client(&config)?;
        Ok(Self::assemble(config, client, source))
    }

    fn assemble(config: Config, client: reqwest::Client, source: Box<dyn RegistrySource>) -> Self {
        let resolver = RegistryResolver::with_host(source, config.host.clone());
        let rewriter = MarkdownRewriter::new(config.host.clone());

        Self {
            config,
            client,
            resolver,
            rewriter,
        }
    }

    fn build_client(config: &Config) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(config.registry.timeout())
            .user_agent(config.registry.user_agent.as_str())
            .build()
            .map_err(|e| TreelineSiteError::Http(e.to_string()).into())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The plugin catalog. The registry is fetched at most once per context.
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.resolver.load_catalog().await
    }

    /// Preview document location for a plugin, if it has a usable repository
    pub fn preview_document_url(&self, plugin: &Plugin) -> Option<String> {
        self.config.host.preview_document_url(&plugin.repo)
    }

    /// Make relative targets in a repository's markdown absolute
    pub fn rewrite_markdown(&self, markdown: &str, repo_url: &str) -> String {
        self.rewriter.rewrite(markdown, repo_url)
    }

    /// Fetch a plugin's preview document and rewrite it for the site.
    ///
    /// `Ok(None)` means there is nothing to show: the plugin is unknown, has no
    /// repository, or the repository does not publish a preview document.
    pub async fn plugin_preview(&self, id: &str) -> Result<Option<String>> {
        let catalog = self.catalog().await;

        let Some(plugin) = catalog.get_plugin(id) else {
            info!("No plugin with id {}", id);
            return Ok(None);
        };

        let Some(url) = self.preview_document_url(plugin) else {
            info!("Plugin {} has no preview document", id);
            return Ok(None);
        };

        info!("Fetching preview document for {}: {}", id, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch preview document {}", url))?;

        if !response.status().is_success() {
            warn!(
                "Preview document for {} returned status {}",
                id,
                response.status()
            );
            return Ok(None);
        }

        let markdown = response
            .text()
            .await
            .with_context(|| format!("Failed to read preview document {}", url))?;

        Ok(Some(self.rewrite_markdown(&markdown, &plugin.repo)))
    }

    /// Snapshot of the resolved catalog
    pub async fn snapshot(&self) -> CatalogSnapshot {
        let catalog = self.catalog().await;
        CatalogSnapshot::from_catalog(&catalog, self.resolver.location())
    }

    /// Write the catalog snapshot, to `path` or the configured location
    pub async fn export_snapshot(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.config.output.expanded_snapshot_path()?,
        };

        let snapshot = self.snapshot().await;
        snapshot.save_to_file(&path)?;

        info!(
            "Wrote catalog snapshot with {} plugins to {:?}",
            snapshot.plugins.len(),
            path
        );
        Ok(path)
    }
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum TreelineSiteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the main application
pub type TreelineSiteResult<T> = Result<T, TreelineSiteError>;
