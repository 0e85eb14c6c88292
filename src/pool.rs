use deadpool::{managed, Runtime};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::error::{PackageStarsError, Result};
use crate::store::StarStore;
use crate::surreal_client::{SurrealClient, SurrealConnectionConfig};

#[derive(Debug)]
pub struct SurrealConnectionManager {
    config: SurrealConnectionConfig,
}

impl SurrealConnectionManager {
    pub fn new(config: SurrealConnectionConfig) -> Self {
        Self { config }
    }
}

impl managed::Manager for SurrealConnectionManager {
    type Type = SurrealClient;
    type Error = PackageStarsError;

    async fn create(&self) -> Result<SurrealClient> {
        SurrealClient::connect(&self.config).await
    }

    async fn recycle(
        &self,
        conn: &mut SurrealClient,
        _: &managed::Metrics,
    ) -> managed::RecycleResult<PackageStarsError> {
        conn.ping().await.map_err(|e| {
            warn!("Dropping stale SurrealDB connection: {}", e);
            managed::RecycleError::Backend(e)
        })
    }
}

pub type SurrealPool = managed::Pool<SurrealConnectionManager>;

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_size: usize,
    pub connection_timeout: Duration,
    pub recycle_timeout: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
            recycle_timeout: Some(Duration::from_secs(10)),
        }
    }
}

pub fn create_pool(
    connection_config: SurrealConnectionConfig,
    pool_config: PoolConfig,
) -> Result<SurrealPool> {
    let manager = SurrealConnectionManager::new(connection_config);

    managed::Pool::builder(manager)
        .max_size(pool_config.max_size)
        .runtime(Runtime::Tokio1)
        .create_timeout(Some(pool_config.connection_timeout))
        .recycle_timeout(pool_config.recycle_timeout)
        .build()
        .map_err(|e| PackageStarsError::PoolError(format!("Failed to create connection pool: {}", e)))
}

/// Star store backed by the `starred` graph edge in SurrealDB
#[derive(Clone)]
pub struct SurrealStarStore {
    pool: Arc<SurrealPool>,
}

impl SurrealStarStore {
    pub fn new(pool: Arc<SurrealPool>) -> Self {
        Self { pool }
    }

    async fn client(&self) -> Result<managed::Object<SurrealConnectionManager>> {
        self.pool
            .get()
            .await
            .map_err(|e| PackageStarsError::PoolError(format!("Failed to get connection from pool: {}", e)))
    }
}

impl StarStore for SurrealStarStore {
    async fn star(&self, package: &str, username: &str) -> Result<()> {
        self.client().await?.star(package, username).await
    }

    async fn unstar(&self, package: &str, username: &str) -> Result<()> {
        self.client().await?.unstar(package, username).await
    }

    async fn ping(&self) -> Result<()> {
        self.client().await?.ping().await
    }
}
