//! Configuration management for the Treeline site tooling

pub mod config;
pub mod output;
pub mod registry;


// Re-export main types for convenience
pub use config::Config;
pub use output::OutputConfig;
pub use registry::RegistryConfig;
pub use treeline_registry::SourceHost;
