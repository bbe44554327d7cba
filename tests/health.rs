use axum::extract::State;
use coffee_shop_api::{
    config::{AppConfig, StorageConfig},
    routes::health::health_check,
    state::AppState,
    storage::{LocalStore, Store},
};
use rust_decimal::Decimal;

#[tokio::test]
async fn health_check_returns_ok() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Store::Local(LocalStore::open(dir.path()).await?);
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        storage: StorageConfig::Local {
            dir: dir.path().to_path_buf(),
        },
        jwt_secret: "test-secret".into(),
        token_ttl_hours: 1,
        super_admin_email: "admin@example.com".into(),
        loyalty_points_rate: Decimal::ONE,
    };

    let response = health_check(State(AppState::new(store, config))).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.storage, "local");
    Ok(())
}
