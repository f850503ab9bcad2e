//! Error bodies and their mapping onto HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::board::{domain::BoardErrorKind, services::BoardServiceError};

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short message for display.
    pub message: String,
    /// Underlying detail, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category.
    #[serde(default)]
    pub code: Option<BoardErrorKind>,
}

/// An error returned by a handler.
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: BoardErrorKind,
    body: ErrorBody,
}

impl ApiError {
    /// Creates an error of `kind` with a display message and optional detail.
    #[must_use]
    pub fn new(kind: BoardErrorKind, message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind,
            body: ErrorBody {
                message: message.into(),
                error: detail,
                code: Some(kind),
            },
        }
    }

    /// Maps a body that is not JSON, on a single-task endpoint.
    #[must_use]
    pub fn invalid_task_body(rejection: &JsonRejection) -> Self {
        Self::new(
            BoardErrorKind::InvalidFormat,
            "Invalid task format",
            Some(rejection.body_text()),
        )
    }

    /// Maps a body that is not JSON, on the bulk endpoint.
    #[must_use]
    pub fn invalid_update_body(rejection: &JsonRejection) -> Self {
        Self::new(
            BoardErrorKind::BadRequest,
            "Invalid update payload",
            Some(rejection.body_text()),
        )
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        self.kind
    }

    /// Returns the response status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        status_for(self.kind)
    }
}

/// Returns the status code carrying `kind`.
#[must_use]
pub const fn status_for(kind: BoardErrorKind) -> StatusCode {
    match kind {
        BoardErrorKind::InvalidFormat | BoardErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        BoardErrorKind::NotFound => StatusCode::NOT_FOUND,
        BoardErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<BoardServiceError> for ApiError {
    fn from(err: BoardServiceError) -> Self {
        if err.kind() == BoardErrorKind::Internal {
            error!(error = %err, "board operation failed");
        }
        Self::new(err.kind(), err.public_message(), Some(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body)).into_response()
    }
}
