use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cinevault_core::{ApiResponse, CatalogError, domain::ValidationError};
use serde_json::json;
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

/// Error type for the enveloped (v2) handlers.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => Self::not_found(msg),
            CatalogError::Conflict(msg) => Self::conflict(msg),
            CatalogError::Validation(err) => Self::bad_request(err.to_string()),
            CatalogError::Serialization(err) => Self::bad_request(err.to_string()),
            CatalogError::Internal(msg) => {
                tracing::error!(error = %msg, "database operation failed");
                Self::internal("Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

/// [`AppError`] rendered as an [`ApiResponse`] without `data`.
///
/// The envelope's `statusCode` always mirrors the HTTP status.
#[derive(Debug)]
pub struct EnvelopeError(pub AppError);

impl EnvelopeError {
    pub fn status(&self) -> StatusCode {
        self.0.status
    }
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for EnvelopeError {}

impl From<AppError> for EnvelopeError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CatalogError> for EnvelopeError {
    fn from(err: CatalogError) -> Self {
        Self(AppError::from(err))
    }
}

impl From<ValidationError> for EnvelopeError {
    fn from(err: ValidationError) -> Self {
        Self(AppError::from(err))
    }
}

impl IntoResponse for EnvelopeError {
    fn into_response(self) -> Response {
        let AppError { status, message } = self.0;
        let body = ApiResponse::message(status.as_u16(), message);
        (status, Json(body)).into_response()
    }
}
