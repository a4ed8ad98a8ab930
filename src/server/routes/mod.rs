mod question_check;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::view::ViewError;

pub use question_check::question_check_router;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("failed to encode metrics: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

pub type ApiResponse<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::View(ViewError::UnknownRow(_)) => StatusCode::NOT_FOUND,
            ApiError::Metrics(_) | ApiError::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
