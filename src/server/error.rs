use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::DashboardError;

/// Error body returned by every API route
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        let message = msg.into();
        log::warn!("Not found: {message}");
        Self {
            status: StatusCode::NOT_FOUND,
            message,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let message = msg.into();
        log::error!("Internal error: {message}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match &err {
            DashboardError::MissingInputFile { path } => {
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                Self::not_found(format!(
                    "'{name}' not found. Keep it in the same folder as the server."
                ))
            }
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Worker task failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
