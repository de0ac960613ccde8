use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Failures coming out of the song store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The path segment could not be parsed into a store identifier.
    #[error("invalid id: {0}")]
    BadId(String),

    #[error("store error: {0}")]
    Driver(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Driver(err.to_string())
    }
}

/// Error envelope returned to HTTP callers as `{"error": message}`.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    /// Maps a store failure onto the route's generic message. The driver
    /// error itself only goes to the log.
    pub fn from_store(err: StoreError, message: &str) -> Self {
        match err {
            StoreError::BadId(raw) => {
                warn!("Invalid song id: {:?}", raw);
                ApiError::new(StatusCode::BAD_REQUEST, "Invalid song id")
            }
            StoreError::Driver(reason) => {
                error!("ERROR: {}", reason);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({"error": self.message})),
        )
            .into_response()
    }
}
