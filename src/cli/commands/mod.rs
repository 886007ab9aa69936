//! CLI command modules

pub mod export;
pub mod info;
pub mod init;
pub mod plugins;
pub mod preview_url;
pub mod rewrite;
pub mod validate;
