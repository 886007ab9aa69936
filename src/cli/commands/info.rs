//! Info command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("info")
        .about("Show tool information")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("detailed")
                .short('d')
                .long("detailed")
                .help("Show detailed information")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");
    let config = utils::load_config(matches)?;

    println!("Treeline Site - plugin catalog tooling");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Repository: {}", env!("CARGO_PKG_REPOSITORY"));
    println!("Registry: {}", config.registry.url);

    if detailed {
        println!("\nDetailed Information:");
        println!("  - Coming-soon plugins: {}", treeline_registry::coming_soon_plugins().len());
        println!("  - Browse host: {}", config.host.browse_host);
        println!("  - Raw host: {}", config.host.raw_host);
        println!("  - Branch: {}", config.host.branch);
        println!("  - Preview file: {}", config.host.preview_file);
        println!("  - Request timeout: {}s", config.registry.timeout_secs);
    }

    Ok(())
}
