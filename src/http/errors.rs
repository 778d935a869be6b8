use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::service::NoteError;

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

// Client mistakes and store faults share the 500 status; only a strict-mode
// miss gets its own code.
pub(crate) fn error_status(err: &NoteError) -> StatusCode {
    match err {
        NoteError::NotFound => StatusCode::NOT_FOUND,
        NoteError::Validation(_) | NoteError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        let status = error_status(&self);
        error!(status = status.as_u16(), error = %self, "request failed");

        let body = Json(ErrorBody {
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for NoteError {
    fn from(rejection: JsonRejection) -> Self {
        NoteError::Validation(rejection.body_text())
    }
}
