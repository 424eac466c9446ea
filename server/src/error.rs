//! HTTP error mapping.
//!
//! Every failure leaves the API as a JSON body `{"message": ...}`. Store
//! failures other than a missing task are logged and replaced with a
//! per-operation message so database details never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Task not found")]
    NotFound,

    /// The request body could not be read as the expected payload, or a field
    /// failed validation.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Maps a store failure, using `context` as the client-facing message
    /// for anything other than a missing task.
    pub fn from_store(err: StoreError, context: &'static str) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => {
                tracing::error!(error = %other, "{context}");
                ApiError::Internal(context)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
