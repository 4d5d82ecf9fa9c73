use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::ErrorResponse;

/// Errors that can occur in the HTTP server.
#[derive(Error, Debug)]
pub enum HttpServerError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T, E = HttpServerError> = std::result::Result<T, E>;

pub fn map_error_to_response(error: HttpServerError) -> Response {
    let status_code = match error {
        HttpServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        HttpServerError::NotFound(_) => StatusCode::NOT_FOUND,
        HttpServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let response = Json(ErrorResponse {
        message: error.to_string(),
    });

    (status_code, response).into_response()
}
