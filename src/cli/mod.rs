//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("treeline-site")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Resolve the Treeline plugin catalog and prepare plugin previews")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::info::command())
            .subcommand(commands::plugins::command())
            .subcommand(commands::preview_url::command())
            .subcommand(commands::rewrite::command())
            .subcommand(commands::export::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            Some(("plugins", sub_matches)) => commands::plugins::run(sub_matches).await,
            Some(("preview-url", sub_matches)) => commands::preview_url::run(sub_matches).await,
            Some(("rewrite", sub_matches)) => commands::rewrite::run(sub_matches).await,
            Some(("export", sub_matches)) => commands::export::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::Result;
    use clap::{Arg, ArgAction, ArgMatches};
    use std::path::PathBuf;
    use tracing::info;

    /// File names looked up in the working directory
    pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
        ".treeline-site.yaml",
        ".treeline-site.yml",
        "treeline-site.yaml",
        "treeline-site.yml",
    ];

    /// `-c/--config FILE`
    pub fn config_arg() -> Arg {
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// `--offline`
    pub fn offline_arg() -> Arg {
        Arg::new("offline")
            .long("offline")
            .help("Skip the registry fetch and use only the coming-soon plugins")
            .action(ArgAction::SetTrue)
    }

    /// Get configuration file path from arguments or look for a default one
    pub fn get_config_path(matches: &ArgMatches) -> Option<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Some(PathBuf::from(config_path));
        }

        let mut candidates: Vec<PathBuf> =
            DEFAULT_CONFIG_FILES.iter().map(PathBuf::from).collect();
        if let Ok(config_dir) = crate::utils::get_config_dir() {
            candidates.push(config_dir.join("config.yaml"));
        }

        candidates.into_iter().find(|path| path.exists())
    }

    /// Load configuration from file, or fall back to the defaults
    pub fn load_config(matches: &ArgMatches) -> Result<crate::Config> {
        match get_config_path(matches) {
            Some(config_path) => {
                info!("Using configuration file {:?}", config_path);
                crate::Config::from_file(&config_path)
            }
            None => {
                info!("No configuration file found, using defaults");
                Ok(crate::Config::default())
            }
        }
    }

    /// Create the site context, honoring `--offline`
    pub fn create_app(matches: &ArgMatches, config: crate::Config) -> Result<crate::TreelineSite> {
        let offline = matches
            .try_get_one::<bool>("offline")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false);

        if offline {
            info!("Offline mode, registry will not be fetched");
            crate::TreelineSite::offline(config)
        } else {
            crate::TreelineSite::new(config)
        }
    }
}
