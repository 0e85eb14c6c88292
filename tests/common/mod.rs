#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use package_stars::error::{PackageStarsError, Result};
use package_stars::server::build_app;
use package_stars::{Identity, SessionTable, StarAction, StarConfig, StarStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const USER: &str = "fakeuser";
pub const PACKAGE: &str = "request";
pub const SESSION_TOKEN: &str = "fakeuser-session";

/// Store that records every call and always succeeds
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub calls: Arc<Mutex<Vec<(StarAction, String, String)>>>,
}

impl RecordingStore {
    pub async fn calls(&self) -> Vec<(StarAction, String, String)> {
        self.calls.lock().await.clone()
    }
}

impl StarStore for RecordingStore {
    async fn star(&self, package: &str, username: &str) -> Result<()> {
        self.calls
            .lock()
            .await
            .push((StarAction::Star, package.to_string(), username.to_string()));
        Ok(())
    }

    async fn unstar(&self, package: &str, username: &str) -> Result<()> {
        self.calls
            .lock()
            .await
            .push((StarAction::Unstar, package.to_string(), username.to_string()));
        Ok(())
    }
}

/// Store whose every operation fails
#[derive(Clone, Default)]
pub struct FailingStore;

impl StarStore for FailingStore {
    async fn star(&self, _package: &str, _username: &str) -> Result<()> {
        Err(PackageStarsError::StoreError("couch is down".to_string()))
    }

    async fn unstar(&self, _package: &str, _username: &str) -> Result<()> {
        Err(PackageStarsError::StoreError("couch is down".to_string()))
    }

    async fn ping(&self) -> Result<()> {
        Err(PackageStarsError::StoreError("couch is down".to_string()))
    }
}

pub struct TestContext<T> {
    pub app: Router,
    pub store: T,
    pub sessions: SessionTable,
}

impl<T: StarStore> TestContext<T> {
    pub async fn new(store: T) -> Self {
        let sessions = SessionTable::default();
        sessions.insert(SESSION_TOKEN, Identity::new(USER)).await;
        let app = build_app(sessions.clone(), store.clone(), StarConfig::default());
        Self { app, store, sessions }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub fn get_star(logged_in: bool) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri("/star");
    if logged_in {
        builder = builder.header(header::COOKIE, format!("sid={}", SESSION_TOKEN));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_star(logged_in: bool, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/star")
        .header(header::CONTENT_TYPE, "application/json");
    if logged_in {
        builder = builder.header(header::COOKIE, format!("sid={}", SESSION_TOKEN));
    }
    builder.body(body.into()).unwrap()
}

pub fn post_star_form(logged_in: bool, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/star")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if logged_in {
        builder = builder.header(header::COOKIE, format!("sid={}", SESSION_TOKEN));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn star_payload(name: &str, is_starred: bool) -> String {
    serde_json::json!({ "name": name, "isStarred": is_starred }).to_string()
}
