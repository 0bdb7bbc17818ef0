use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::types::ErrorResponse;
use crate::entries::store::StoreError;

#[derive(Debug, Error)]
pub enum LookupError {
    /// Missing or malformed fields. Reported before any storage call.
    #[error("{0}")]
    InvalidInput(String),
    #[error("word '{0}' already exists")]
    Conflict(String),
    #[error("word '{0}' not found")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl LookupError {
    /// Stable machine-readable code for the error body.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidInput(_) => "invalid_input",
            LookupError::Conflict(_) => "conflict",
            LookupError::NotFound(_) => "not_found",
            LookupError::StorageUnavailable(_) => "storage_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LookupError::Conflict(_) => StatusCode::CONFLICT,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message shown to callers. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            LookupError::StorageUnavailable(_) => "storage unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for LookupError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput(msg) => LookupError::InvalidInput(msg),
            StoreError::Conflict(word) => LookupError::Conflict(word),
            StoreError::Unavailable(msg) => LookupError::StorageUnavailable(msg),
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        if let LookupError::StorageUnavailable(detail) = &self {
            tracing::error!("Storage failure: {}", detail);
        }
        let body = ErrorResponse {
            error: self.public_message(),
            kind: self.kind().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
