//! Registry acquisition errors

use reqwest::StatusCode;

/// Why the remote registry could not be used
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("HTTP client could not be built: {0}")]
    Client(String),

    #[error("Registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Registry returned status {0}")]
    Status(StatusCode),

    #[error("Registry body is not a valid registry document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for registry acquisition
pub type RegistryResult<T> = Result<T, RegistryError>;
