use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;

/// Persistence for star toggles. Implementations own any consistency
/// guarantees for concurrent toggles of the same package.
pub trait StarStore: Clone + Send + Sync + 'static {
    fn star(&self, package: &str, username: &str) -> impl Future<Output = Result<()>> + Send;

    fn unstar(&self, package: &str, username: &str) -> impl Future<Output = Result<()>> + Send;

    /// Cheap reachability check used by the readiness probe
    fn ping(&self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}

/// Process-local store, keyed by username
#[derive(Clone, Debug, Default)]
pub struct MemoryStarStore {
    stars: Arc<RwLock<HashMap<String, HashMap<String, DateTime<Utc>>>>>,
}

impl MemoryStarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_starred(&self, package: &str, username: &str) -> bool {
        self.stars
            .read()
            .await
            .get(username)
            .is_some_and(|packages| packages.contains_key(package))
    }

    /// Packages starred by `username`, oldest star first
    pub async fn starred_by(&self, username: &str) -> Vec<String> {
        let stars = self.stars.read().await;
        let mut packages: Vec<(&String, &DateTime<Utc>)> = stars
            .get(username)
            .map(|p| p.iter().collect())
            .unwrap_or_default();
        packages.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        packages.into_iter().map(|(name, _)| name.clone()).collect()
    }
}

impl StarStore for MemoryStarStore {
    async fn star(&self, package: &str, username: &str) -> Result<()> {
        let mut stars = self.stars.write().await;
        stars
            .entry(username.to_string())
            .or_default()
            .entry(package.to_string())
            .or_insert_with(Utc::now);
        debug!("{} starred {} (memory)", username, package);
        Ok(())
    }

    async fn unstar(&self, package: &str, username: &str) -> Result<()> {
        let mut stars = self.stars.write().await;
        if let Some(packages) = stars.get_mut(username) {
            packages.remove(package);
            if packages.is_empty() {
                stars.remove(username);
            }
        }
        debug!("{} unstarred {} (memory)", username, package);
        Ok(())
    }
}
