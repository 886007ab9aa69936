//! Export command implementation

use crate::cli::utils;
use crate::utils::format_bytes;
use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub fn command() -> Command {
    Command::new("export")
        .about("Write the resolved plugin catalog as a JSON snapshot")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Snapshot file, defaults to output.snapshot_path from the configuration")
                .value_name("FILE"),
        )
        .arg(utils::config_arg())
        .arg(utils::offline_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    config.validate()?;

    let output = matches.get_one::<String>("output").map(PathBuf::from);
    let app = utils::create_app(matches, config)?;

    let path = app.export_snapshot(output.as_deref()).await?;
    let size = std::fs::metadata(&path)?.len();

    println!("Wrote {} ({})", path.display(), format_bytes(size));

    Ok(())
}
