//! Error types for the todo API client.
//!
//! The server's three failure kinds each get a variant carrying its
//! `message`. Anything that does not fit lands in `HttpError` with the raw
//! status and body.

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400: the server rejected the request body.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 404: the requested todo does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// 500: the server's store failed.
    #[error("server error: {message} ({error})")]
    Server { message: String, error: String },

    /// Any other unexpected status, or an error body that could not be read.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
