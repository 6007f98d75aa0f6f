//! Note store errors and their HTTP mapping.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use notes_types::ErrorBody;
use thiserror::Error;

pub type NoteResult<T> = Result<T, NoteError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// Empty or whitespace-only title/content
    #[error("{0}")]
    InvalidInput(String),

    /// Another note already holds the title (case-insensitive)
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Request could not be extracted (bad JSON, missing field, bad query)
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl NoteError {
    pub fn not_found() -> Self {
        NoteError::NotFound("Nota no encontrada".to_string())
    }

    pub fn duplicate_title() -> Self {
        NoteError::Conflict("Ya existe una nota con ese título".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            NoteError::InvalidInput(_) | NoteError::Conflict(_) => StatusCode::BAD_REQUEST,
            NoteError::NotFound(_) => StatusCode::NOT_FOUND,
            NoteError::Rejected { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for NoteError {
    fn from(rejection: JsonRejection) -> Self {
        NoteError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for NoteError {
    fn from(rejection: QueryRejection) -> Self {
        NoteError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for NoteError {
    fn from(rejection: PathRejection) -> Self {
        NoteError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        log::warn!("[NOTES] {} {}", status.as_u16(), self);

        let body = Json(ErrorBody {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}
