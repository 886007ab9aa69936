use treeline_site::cli::commands::plugins::StatusFilter;
use treeline_site::cli::CliApp;

#[test]
fn test_cli_definition_is_consistent() {
    CliApp::app().debug_assert();
}

#[test]
fn test_plugins_list_arguments() {
    let matches = CliApp::app()
        .try_get_matches_from([
            "treeline-site",
            "plugins",
            "list",
            "--featured",
            "--status",
            "coming-soon",
            "--offline",
        ])
        .unwrap();

    let (_, plugins) = matches.subcommand().unwrap();
    let (name, list) = plugins.subcommand().unwrap();
    assert_eq!(name, "list");
    assert!(list.get_flag("featured"));
    assert!(list.get_flag("offline"));
    assert_eq!(
        list.get_one::<StatusFilter>("status"),
        Some(&StatusFilter::ComingSoon)
    );
}

#[test]
fn test_rewrite_requires_repo() {
    assert!(CliApp::app()
        .try_get_matches_from(["treeline-site", "rewrite", "README.md"])
        .is_err());

    let matches = CliApp::app()
        .try_get_matches_from([
            "treeline-site",
            "rewrite",
            "--repo",
            "https://github.com/acme/widget",
            "README.md",
        ])
        .unwrap();
    let (_, rewrite) = matches.subcommand().unwrap();
    assert_eq!(
        rewrite.get_one::<String>("FILE").map(String::as_str),
        Some("README.md")
    );
}

#[test]
fn test_unknown_status_is_rejected() {
    assert!(CliApp::app()
        .try_get_matches_from(["treeline-site", "plugins", "list", "--status", "retired"])
        .is_err());
}
