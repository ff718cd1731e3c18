//! Transport errors and their HTTP representation.
//!
//! # Invariants
//! - Bodies are always `{"message": "..."}`.
//! - Internal failures are logged with detail but answered generically.
//! - Client errors are not logged here; `middleware::request_logging` records
//!   them once.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use todolist_core::TodoServiceError;

pub const DESCRIPTION_REQUIRED: &str = "Description is required";

pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred while processing the request.";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Detail is logged, never returned to the client.
    Internal(String),
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// Mapping for reads: a missing item is `404`.
    pub fn from_lookup(err: TodoServiceError) -> Self {
        match err {
            TodoServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            TodoServiceError::Conflict(_) => Self::BadRequest(err.to_string()),
            TodoServiceError::Repo(repo) => Self::Internal(repo.to_string()),
        }
    }

    /// Mapping for writes: missing items and conflicts are both `400`.
    pub fn from_write(err: TodoServiceError) -> Self {
        match err {
            TodoServiceError::NotFound(_) | TodoServiceError::Conflict(_) => {
                Self::BadRequest(err.to_string())
            }
            TodoServiceError::Repo(repo) => Self::Internal(repo.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => write!(f, "{message}"),
            Self::Internal(detail) => write!(f, "internal error: {detail}"),
        }
    }
}

impl Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::Internal(detail) => {
                error!(
                    "event=http_error module=api status=error http_status={} error={}",
                    status.as_u16(),
                    detail
                );
                INTERNAL_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
