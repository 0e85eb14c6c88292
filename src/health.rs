use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::warn;

use crate::store::StarStore;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub store: CheckResult,
}

/// Result of an individual check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe response (minimal, just indicates the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct HealthState<T> {
    pub store: T,
    pub start_time: Instant,
}

impl<T: StarStore> HealthState<T> {
    pub fn new(store: T) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }
}

pub fn health_router<T: StarStore>(state: HealthState<T>) -> Router {
    Router::new()
        .route("/health", get(health_check::<T>))
        .route("/healthz", get(health_check::<T>)) // Kubernetes convention
        .route("/livez", get(liveness_check))
        .route("/readyz", get(readiness_check::<T>))
        .with_state(state)
}

async fn check_store<T: StarStore>(store: &T) -> CheckResult {
    match tokio::time::timeout(PING_TIMEOUT, store.ping()).await {
        Ok(Ok(())) => CheckResult {
            status: HealthStatus::Healthy,
            message: None,
        },
        Ok(Err(e)) => {
            warn!("Star store health check failed: {}", e);
            CheckResult {
                status: HealthStatus::Unhealthy,
                message: Some(format!("Star store unreachable: {}", e)),
            }
        }
        Err(_) => CheckResult {
            status: HealthStatus::Unhealthy,
            message: Some(format!("Star store did not answer within {:?}", PING_TIMEOUT)),
        },
    }
}

async fn health_check<T: StarStore>(State(state): State<HealthState<T>>) -> impl IntoResponse {
    let store_check = check_store(&state.store).await;
    let status = store_check.status;

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        checks: HealthChecks { store: store_check },
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Kubernetes liveness probe - just checks if the process is alive
async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}

/// Kubernetes readiness probe - ready once the star store answers
async fn readiness_check<T: StarStore>(State(state): State<HealthState<T>>) -> impl IntoResponse {
    let store_check = check_store(&state.store).await;
    let ready = store_check.status == HealthStatus::Healthy;

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            message: store_check.message,
        }),
    )
}
