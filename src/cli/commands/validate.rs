//! Validate command implementation

use crate::cli::utils;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate configuration file")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating configuration file");

    let config_path = utils::get_config_path(matches).ok_or_else(|| {
        anyhow!("No configuration file found. Use --config to specify a file or create one with 'treeline-site init'")
    })?;
    let config = crate::Config::from_file(&config_path)?;

    println!("Configuration file is valid!");
    println!("Version: {}", config.version);
    println!("Registry: {}", config.registry.url);
    println!("Timeout: {}s", config.registry.timeout_secs);
    println!(
        "Host: {} (raw: {}, branch: {})",
        config.host.browse_host, config.host.raw_host, config.host.branch
    );
    println!("Preview file: {}", config.host.preview_file);
    println!("Snapshot path: {:?}", config.output.snapshot_path);

    Ok(())
}
