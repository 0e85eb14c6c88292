use axum::http::{header, HeaderMap};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{PackageStarsError, Result};
use crate::types::Identity;

pub const DEFAULT_SESSION_COOKIE: &str = "sid";

/// Resolves the logged-in user for an inbound request, if any.
pub trait SessionResolver: Clone + Send + Sync + 'static {
    fn resolve(&self, headers: &HeaderMap) -> impl Future<Output = Option<Identity>> + Send;
}

/// Cookie-keyed session lookup backed by an in-process token table
#[derive(Clone, Debug)]
pub struct SessionTable {
    cookie_name: String,
    sessions: Arc<RwLock<HashMap<String, Identity>>>,
}

impl SessionTable {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub async fn insert(&self, token: impl Into<String>, identity: Identity) {
        self.sessions.write().await.insert(token.into(), identity);
    }

    pub async fn remove(&self, token: &str) -> Option<Identity> {
        self.sessions.write().await.remove(token)
    }

    /// Seed a session from a `TOKEN:USERNAME` pair
    pub async fn insert_spec(&self, spec: &str) -> Result<()> {
        let (token, username) = parse_session_spec(spec)?;
        self.insert(token, Identity::new(username)).await;
        Ok(())
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl SessionResolver for SessionTable {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = session_token(headers, &self.cookie_name)?;
        let identity = self.sessions.read().await.get(&token).cloned();
        if identity.is_none() {
            debug!("Unknown session token in {} cookie", self.cookie_name);
        }
        identity
    }
}

/// Pull the value of `cookie_name` out of every `Cookie` header on the request
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn parse_session_spec(spec: &str) -> Result<(String, String)> {
    match spec.split_once(':') {
        Some((token, username)) if !token.is_empty() && !username.is_empty() => {
            Ok((token.to_string(), username.to_string()))
        }
        _ => Err(PackageStarsError::ConfigError(format!(
            "Invalid session '{}', expected TOKEN:USERNAME",
            spec
        ))),
    }
}
