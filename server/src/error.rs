//! HTTP-facing errors.
//!
//! Every failure a handler can return is one of three kinds: rejected input
//! (400), a missing todo on lookup (404), or a store failure (500). The
//! response body is always `{"message": ...}`; store failures also carry the
//! underlying error text under `"error"`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::request::InvalidInput;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Invalid(#[from] InvalidInput),

    #[error("Todo with id {0} not found.")]
    NotFound(String),

    /// `context` is the operation-specific message shown to the client.
    #[error("{context}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiError {
    pub fn store(context: impl Into<String>) -> impl FnOnce(StoreError) -> Self {
        let context = context.into();
        move |source| Self::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Store { context, source } => {
                tracing::error!(error = %source, "{context}");
                ErrorBody {
                    message: context,
                    error: Some(source.to_string()),
                }
            }
            other => ErrorBody {
                message: other.to_string(),
                error: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
