use axum::Router;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::SessionResolver;
use crate::error::Result;
use crate::health::{health_router, HealthState};
use crate::star::{star_router, StarConfig, StarState};
use crate::store::StarStore;

/// Full HTTP surface: `/star` plus the health probes, traced per request
pub fn build_app<S: SessionResolver, T: StarStore>(
    sessions: S,
    store: T,
    config: StarConfig,
) -> Router {
    let health = HealthState::new(store.clone());
    let stars = StarState::new(sessions, store, config);

    Router::new()
        .merge(star_router(stars))
        .merge(health_router(health))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Star server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Star server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
