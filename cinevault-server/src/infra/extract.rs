//! Body and path extractors whose rejections use the API's own error shapes.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
};

use super::errors::{AppError, EnvelopeError};

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    // Missing, malformed and mistyped bodies are all client input errors.
    let status = match rejection.status() {
        StatusCode::UNPROCESSABLE_ENTITY | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            StatusCode::BAD_REQUEST
        }
        other => other,
    };
    tracing::debug!(%status, reason = %rejection.body_text(), "rejected request body");
    AppError::new(status, rejection.body_text())
}

/// A v1 JSON body. Rejections render as [`AppError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| JsonBody(value))
            .map_err(rejection_to_error)
    }
}

/// A v2 envelope body. Rejections render as an `ApiResponse`.
///
/// Use `Envelope<ApiRequest<T>>` for payload-carrying actions and
/// `Envelope<ApiRequestMeta>` for actions that only need caller metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct Envelope<T>(pub T);

impl<S, T> FromRequest<S> for Envelope<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = EnvelopeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Envelope(value))
            .map_err(|rejection| EnvelopeError(rejection_to_error(rejection)))
    }
}

fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    let status = rejection.status();
    if status.is_server_error() {
        tracing::error!(reason = %rejection.body_text(), "route parameters unavailable");
        return AppError::internal("Invalid route parameters");
    }
    tracing::debug!(%status, reason = %rejection.body_text(), "rejected path parameters");
    AppError::new(status, rejection.body_text())
}

/// v1 path parameters. Rejections render as [`AppError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| PathParam(value))
            .map_err(path_rejection_to_error)
    }
}

/// v2 path parameters. Rejections render as an `ApiResponse`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopePath<T>(pub T);

impl<S, T> FromRequestParts<S> for EnvelopePath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = EnvelopeError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| EnvelopePath(value))
            .map_err(|rejection| EnvelopeError(path_rejection_to_error(rejection)))
    }
}
