use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

/// Body sent to anonymous callers that try to toggle a star.
pub const NOT_LOGGED_IN: &str = "user isn't logged in";

#[derive(Error, Debug)]
pub enum PackageStarsError {
    #[error("Star store error: {0}")]
    StoreError(String),

    #[error("Database error: {0}")]
    Database(#[from] surrealdb::Error),

    #[error("Connection pool error: {0}")]
    PoolError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid star payload: {0}")]
    PayloadError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, PackageStarsError>;

/// Failures the `/star` endpoint reports to its caller.
#[derive(Error, Debug)]
pub enum StarError {
    #[error("{}", NOT_LOGGED_IN)]
    AuthenticationMissing,

    /// Also covers payloads that could not be read, which never reach the store
    #[error("Failed to update star: {0}")]
    StoreFailure(#[from] PackageStarsError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StarError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StarError::AuthenticationMissing => StatusCode::FORBIDDEN,
            StarError::StoreFailure(_) | StarError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for StarError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            // Expected control path, not a system error
            StarError::AuthenticationMissing => debug!("Rejected anonymous star toggle"),
            StarError::StoreFailure(e) => error!("Star store failed: {}", e),
            StarError::Internal(reason) => error!("Star endpoint failed: {}", reason),
        }

        (status, self.to_string()).into_response()
    }
}
