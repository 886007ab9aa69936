//! Rewrite command implementation

use crate::cli::utils;
use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::io::Read;
use treeline_markdown::MarkdownRewriter;

pub fn command() -> Command {
    Command::new("rewrite")
        .about("Make relative links and images in a markdown document absolute")
        .arg(
            Arg::new("repo")
                .short('r')
                .long("repo")
                .help("Repository the document belongs to")
                .value_name("URL")
                .required(true),
        )
        .arg(
            Arg::new("FILE")
                .help("Markdown file to rewrite, reads stdin when omitted"),
        )
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let repo = matches
        .get_one::<String>("repo")
        .ok_or_else(|| anyhow!("Missing repository URL"))?;
    let config = utils::load_config(matches)?;

    let markdown = match matches.get_one::<String>("FILE") {
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read markdown file {}", file))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read markdown from stdin")?;
            buffer
        }
    };

    let rewriter = MarkdownRewriter::new(config.host);
    print!("{}", rewriter.rewrite(&markdown, repo));

    Ok(())
}
