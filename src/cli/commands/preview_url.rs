//! Preview-url command implementation

use crate::cli::utils;
use anyhow::{anyhow, Result};
use clap::{Arg, ArgMatches, Command};

pub fn command() -> Command {
    Command::new("preview-url")
        .about("Print where a repository's preview document lives")
        .arg(
            Arg::new("REPO")
                .help("Repository URL, e.g. https://github.com/owner/name")
                .required(true),
        )
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let repo = matches
        .get_one::<String>("REPO")
        .ok_or_else(|| anyhow!("Missing repository URL"))?;
    let config = utils::load_config(matches)?;

    match config.host.preview_document_url(repo) {
        Some(url) => println!("{}", url),
        None => println!(
            "{} is not a repository on {}, no preview document",
            repo, config.host.browse_host
        ),
    }

    Ok(())
}
