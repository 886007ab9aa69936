//! Registry fetch configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::TreelineSiteError;
use treeline_registry::{DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT_SECS};

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// URL of the registry document
    pub url: String,

    /// Timeout for registry and preview requests
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(TreelineSiteError::Config(format!(
                "Registry URL must be http(s): {}",
                self.url
            ))
            .into());
        }

        if self.timeout_secs == 0 {
            return Err(
                TreelineSiteError::Config("Registry timeout must be at least 1 second".into())
                    .into(),
            );
        }

        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("treeline-site/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
