use std::time::{Duration, Instant};
use treeline_registry::coming_soon_plugins;
use treeline_site::{Config, HttpRegistrySource, PluginStatus, TreelineSite};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry_body() -> serde_json::Value {
    serde_json::json!({
        "description": "Official Treeline plugins",
        "plugins": [
            {
                "id": "goals",
                "name": "Savings Goals",
                "description": "Track progress toward savings goals",
                "author": "Treeline",
                "repo": "https://github.com/treeline-money/plugin-goals",
                "featured": true
            },
            {
                "id": "budget",
                "name": "Budget",
                "description": "Monthly budgets",
                "repo": "https://github.com/someone/plugin-budget"
            }
        ]
    })
}

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.registry.url = format!("{}/plugins.json", server.uri());
    config.registry.timeout_secs = 5;
    config
}

#[tokio::test]
async fn test_catalog_is_registry_then_coming_soon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plugins.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registry_body()))
        .mount(&server)
        .await;

    let app = TreelineSite::new(config_for(&server)).unwrap();
    let catalog = app.catalog().await;

    let fallback = coming_soon_plugins();
    assert_eq!(catalog.len(), 2 + fallback.len());
    assert_eq!(catalog.description(), "Official Treeline plugins");

    let ids = catalog.list_ids();
    assert_eq!(&ids[..2], &["goals", "budget"]);
    for (id, plugin) in ids[2..].iter().zip(&fallback) {
        assert_eq!(*id, plugin.id);
    }

    assert!(catalog.plugins()[..2].iter().all(|p| p.status == PluginStatus::Available));
    assert!(catalog.plugins()[2..].iter().all(|p| p.status == PluginStatus::ComingSoon));

    let featured: Vec<&str> = catalog.featured().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(featured, vec!["goals"]);
}

#[tokio::test]
async fn test_registry_is_fetched_once_per_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plugins.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registry_body()))
        .expect(1)
        .mount(&server)
        .await;

    let app = TreelineSite::new(config_for(&server)).unwrap();
    let first = app.catalog().await;
    let second = app.catalog().await;

    assert_eq!(first, second);
    server.verify().await;
}

#[tokio::test]
async fn test_unreachable_registry_degrades_to_coming_soon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plugins.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = TreelineSite::new(config_for(&server)).unwrap();
    let catalog = app.catalog().await;

    assert_eq!(catalog.plugins(), coming_soon_plugins().as_slice());
    assert_eq!(catalog.description(), "");
    assert!(catalog.featured().is_empty());
}

#[tokio::test]
async fn test_malformed_registry_degrades_to_coming_soon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plugins.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let app = TreelineSite::new(config_for(&server)).unwrap();
    assert_eq!(app.catalog().await.plugins(), coming_soon_plugins().as_slice());
}

#[tokio::test]
async fn test_slow_registry_degrades_within_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plugins.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(registry_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.registry.timeout_secs = 1;
    let app = TreelineSite::new(config).unwrap();

    let started = Instant::now();
    let catalog = app.catalog().await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(catalog.plugins(), coming_soon_plugins().as_slice());
}

#[tokio::test]
async fn test_refused_connection_degrades_to_coming_soon() {
    // Bind and release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let mut config = Config::default();
    config.registry.url = format!("http://{}/plugins.json", address);
    config.registry.timeout_secs = 5;
    let app = TreelineSite::new(config).unwrap();

    let catalog = app.catalog().await;
    assert_eq!(catalog.plugins(), coming_soon_plugins().as_slice());
    assert_eq!(catalog.description(), "");
}

#[tokio::test]
async fn test_mistyped_registry_fields_keep_plugins() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "plugins": [
            { "id": "a", "name": "A", "author": { "name": "x" } },
            { "id": "b", "name": "B", "featured": "true" },
            { "id": "c", "description": "no name" }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/plugins.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let app = TreelineSite::new(config_for(&server)).unwrap();
    let catalog = app.catalog().await;

    assert_eq!(&catalog.list_ids()[..3], &["a", "b", "c"]);
    assert_eq!(catalog.get_plugin("c").unwrap().name, "c");
    assert!(catalog.featured().is_empty());
}

#[tokio::test]
async fn test_custom_source() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/registry/v2.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registry_body()))
        .mount(&server)
        .await;

    let source = HttpRegistrySource::new(
        format!("{}/registry/v2.json", server.uri()),
        Duration::from_secs(5),
        "treeline-site-tests",
    )
    .unwrap();

    let app = TreelineSite::with_source(Config::default(), Box::new(source)).unwrap();
    assert!(app.catalog().await.get_plugin("budget").is_some());
}

#[tokio::test]
async fn test_offline_catalog() {
    let app = TreelineSite::offline(Config::default()).unwrap();
    let catalog = app.catalog().await;

    assert_eq!(catalog.plugins(), coming_soon_plugins().as_slice());
    assert!(catalog.available().is_empty());
}
