//! API error handling
//!
//! Every failure is rendered as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cv_core::traits::Entity;
use cv_db::RepositoryError;
use serde::Serialize;

/// API error types
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No row matched the id; carries the entity's fixed message
    NotFound(String),
    /// The request body or path could not be read into the expected shape
    Validation(String),
    /// Anything the storage engine rejected or failed on
    Storage(String),
}

impl ApiError {
    pub fn not_found<E: Entity>() -> Self {
        ApiError::NotFound(E::NOT_FOUND_MESSAGE.to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg) | ApiError::Validation(msg) | ApiError::Storage(msg) => msg,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ApiError::NotFound(msg),
            other => {
                tracing::error!(error = %other, "Storage fault");
                ApiError::Storage(other.storage_message())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Validation(msg) = &self {
            tracing::debug!(%msg, "Rejected request");
        }
        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
