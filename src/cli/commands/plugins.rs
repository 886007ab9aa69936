//! Plugin catalog CLI commands

use crate::cli::utils;
use crate::utils::truncate;
use crate::{Plugin, PluginStatus};
use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum};

/// Status filter for `plugins list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Available,
    ComingSoon,
}

impl From<StatusFilter> for PluginStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Available => PluginStatus::Available,
            StatusFilter::ComingSoon => PluginStatus::ComingSoon,
        }
    }
}

/// Create the plugins command
pub fn command() -> Command {
    Command::new("plugins")
        .about("Inspect the plugin catalog")
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List catalog plugins")
                .arg(utils::config_arg())
                .arg(utils::offline_arg())
                .arg(
                    Arg::new("featured")
                        .long("featured")
                        .help("Only show featured plugins")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .help("Only show plugins with this status")
                        .value_parser(clap::value_parser!(StatusFilter)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print JSON instead of a table")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("ids")
                .about("Print every plugin id in catalog order")
                .arg(utils::config_arg())
                .arg(utils::offline_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Show a single plugin")
                .arg(Arg::new("PLUGIN_ID").help("Plugin ID").required(true))
                .arg(utils::config_arg())
                .arg(utils::offline_arg())
                .arg(
                    Arg::new("preview")
                        .long("preview")
                        .help("Fetch and print the rewritten preview document")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Run plugin command
pub async fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("list", sub_matches)) => run_list(sub_matches).await,
        Some(("ids", sub_matches)) => run_ids(sub_matches).await,
        Some(("show", sub_matches)) => run_show(sub_matches).await,
        _ => Err(anyhow!("Unknown plugins subcommand")),
    }
}

async fn run_list(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let app = utils::create_app(matches, config)?;
    let catalog = app.catalog().await;

    let mut plugins: Vec<&Plugin> = if matches.get_flag("featured") {
        catalog.featured()
    } else {
        catalog.plugins().iter().collect()
    };

    if let Some(filter) = matches.get_one::<StatusFilter>("status") {
        let status = PluginStatus::from(*filter);
        plugins.retain(|p| p.status == status);
    }

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plugins)?);
        return Ok(());
    }

    if plugins.is_empty() {
        println!("No plugins found");
        return Ok(());
    }

    println!("{:<20} {:<24} {:<12} {:<8} DESCRIPTION", "ID", "NAME", "STATUS", "FEATURED");
    for plugin in &plugins {
        println!(
            "{:<20} {:<24} {:<12} {:<8} {}",
            plugin.id,
            truncate(&plugin.name, 24),
            plugin.status,
            if plugin.featured { "yes" } else { "" },
            truncate(&plugin.description, 60)
        );
    }
    println!("\n{} plugin(s)", plugins.len());

    Ok(())
}

async fn run_ids(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let app = utils::create_app(matches, config)?;
    let catalog = app.catalog().await;

    for id in catalog.list_ids() {
        println!("{}", id);
    }

    Ok(())
}

async fn run_show(matches: &ArgMatches) -> Result<()> {
    let plugin_id = matches
        .get_one::<String>("PLUGIN_ID")
        .ok_or_else(|| anyhow!("Missing plugin id"))?;

    let config = utils::load_config(matches)?;
    let app = utils::create_app(matches, config)?;
    let catalog = app.catalog().await;

    let plugin = catalog
        .get_plugin(plugin_id)
        .ok_or_else(|| anyhow!("Plugin {} not found", plugin_id))?;

    println!("Plugin: {}", plugin.name);
    println!("  ID: {}", plugin.id);
    println!("  Status: {}", plugin.status);
    println!("  Featured: {}", plugin.featured);
    if let Some(author) = &plugin.author {
        println!("  Author: {}", author);
    }
    if plugin.has_repo() {
        println!("  Repository: {}", plugin.repo);
    }
    match app.preview_document_url(plugin) {
        Some(url) => println!("  Preview: {}", url),
        None => println!("  Preview: none"),
    }
    println!("  Description: {}", plugin.description);

    if matches.get_flag("preview") {
        match app.plugin_preview(plugin_id).await? {
            Some(markdown) => println!("\n{}", markdown),
            None => println!("\nNo preview document available"),
        }
    }

    Ok(())
}
