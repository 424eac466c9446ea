//! Error types for the task API client.
//!
//! `NotFound` and `BadRequest` get dedicated variants because a UI reacts to
//! them differently (drop the stale row, show the server's complaint). Every
//! other non-200 response lands in `HttpError`.

/// Errors returned by `TaskClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404; the task does not exist.
    #[error("task not found")]
    NotFound,

    /// The server rejected the payload with 400.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any other non-200 status. `message` is the server's `{message}` field
    /// when the body has one, otherwise the raw body.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The form failed client-side validation; no request was built.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
