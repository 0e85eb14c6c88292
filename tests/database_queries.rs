//! Live SurrealDB tests. Start a database first, e.g.
//! `surreal start --bind 0.0.0.0:8000 --user root --pass root memory`,
//! then run `cargo test -- --ignored`.

use package_stars::pool::{create_pool, PoolConfig, SurrealStarStore};
use package_stars::surreal_client::{SurrealClient, SurrealConnectionConfig};
use package_stars::StarStore;
use std::sync::Arc;
use std::time::Duration;

fn connection_config() -> SurrealConnectionConfig {
    SurrealConnectionConfig {
        url: std::env::var("DB_URL").unwrap_or_else(|_| "ws://localhost:8000".to_string()),
        username: std::env::var("DB_USER").unwrap_or_else(|_| "root".to_string()),
        password: std::env::var("DB_PASS").unwrap_or_else(|_| "root".to_string()),
        namespace: std::env::var("DB_NAMESPACE").unwrap_or_else(|_| "registry_test".to_string()),
        database: std::env::var("DB_DATABASE").unwrap_or_else(|_| "stars".to_string()),
    }
}

async fn connect() -> anyhow::Result<SurrealClient> {
    let client = tokio::time::timeout(
        Duration::from_secs(5),
        SurrealClient::connect(&connection_config())
    ).await
        .map_err(|_| anyhow::anyhow!("Connection to SurrealDB timed out"))??;
    Ok(client)
}

#[tokio::test]
#[ignore = "requires a running SurrealDB instance"]
async fn test_database_connection() {
    let client = connect().await.expect("Failed to connect to SurrealDB");
    client.ping().await.expect("Ping failed");
}

#[tokio::test]
#[ignore = "requires a running SurrealDB instance"]
async fn test_star_and_unstar_edge() {
    let client = connect().await.expect("Failed to connect to SurrealDB");

    client.star("request", "fakeuser").await.expect("Failed to star");
    let star = client.get_star("request", "fakeuser").await.expect("Failed to read star");
    assert!(star.is_some(), "Expected a starred edge after star");

    // Starring twice keeps a single edge
    client.star("request", "fakeuser").await.expect("Failed to star twice");
    assert!(client.get_star("request", "fakeuser").await.unwrap().is_some());

    client.unstar("request", "fakeuser").await.expect("Failed to unstar");
    let star = client.get_star("request", "fakeuser").await.expect("Failed to read star");
    assert!(star.is_none(), "Expected no starred edge after unstar");
}

#[tokio::test]
#[ignore = "requires a running SurrealDB instance"]
async fn test_pooled_store() {
    let pool = create_pool(connection_config(), PoolConfig::default())
        .expect("Failed to create pool");
    let store = SurrealStarStore::new(Arc::new(pool));

    store.ping().await.expect("Pooled ping failed");
    store.star("express", "pooluser").await.expect("Pooled star failed");
    store.unstar("express", "pooluser").await.expect("Pooled unstar failed");
}
