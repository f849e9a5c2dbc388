use eduspace::components::{Component, ComponentManager, Roster};
use eduspace::config::Config;
use eduspace::startup;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Smoke test to verify that a minimal config is usable
#[tokio::test]
async fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.port, 3000);
    assert_eq!(config.fiscal_year, 2026);
    assert!(config.gemini_api_key.is_none());
    assert!(config.tz().is_ok());
}

/// All enabled components come up and expose their handles
#[tokio::test]
async fn test_components_start_and_stop() {
    let config = Arc::new(RwLock::new(Config::default()));
    let manager = startup::build_components(config).await.unwrap();

    assert!(manager.get_component_by_name("roster").is_some());
    assert!(manager.get_component_by_name("insight").is_some());

    let roster = startup::roster_handle(&manager).await.unwrap();
    assert_eq!(roster.list_centers().await.unwrap().len(), 13);

    // No API key configured
    let summarizer = startup::summarizer(&manager).await;
    assert_eq!(summarizer.name(), "unavailable");

    assert!(manager.shutdown_all().await.is_ok());
}

/// Disabling insight still yields a summarizer that falls back
#[tokio::test]
async fn test_insight_can_be_disabled() {
    let mut config = Config::default();
    config.components.insert("insight".to_string(), false);

    let manager = startup::build_components(Arc::new(RwLock::new(config)))
        .await
        .unwrap();
    assert!(manager.get_component_by_name("insight").is_none());
    assert_eq!(startup::summarizer(&manager).await.name(), "unavailable");
}

/// The roster itself is required
#[tokio::test]
async fn test_roster_cannot_be_disabled() {
    let mut config = Config::default();
    config.components.insert("roster".to_string(), false);

    assert!(startup::build_components(Arc::new(RwLock::new(config)))
        .await
        .is_err());
}

/// A second init keeps the existing roster state
#[tokio::test]
async fn test_roster_init_is_idempotent() {
    let config = Arc::new(RwLock::new(Config::default()));
    let roster = Roster::new();
    roster.init(Arc::clone(&config)).await.unwrap();

    let handle = roster.get_handle().await.unwrap();
    handle.assign_tenant("center-1", 0, 11, "Camp").await.unwrap();

    roster.init(config).await.unwrap();
    let center = roster.get_handle().await.unwrap().get_center("center-1").await.unwrap();
    assert_eq!(center.occupancy_rate, 100);

    let manager = ComponentManager::new(Arc::new(RwLock::new(Config::default())));
    assert!(manager.get::<Roster>("roster").is_none());
}
