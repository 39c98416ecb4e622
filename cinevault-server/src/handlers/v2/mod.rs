//! Envelope handlers.
//!
//! Every action takes an [`ApiRequest`](cinevault_core::ApiRequest) (or just
//! its caller metadata) and answers with an
//! [`ApiResponse`](cinevault_core::ApiResponse) whose `statusCode` matches
//! the HTTP status. Each call is logged with the server-assigned request id.

pub mod actors;
pub mod likes;
pub mod movies;
pub mod reviews;
pub mod users;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use cinevault_core::{ApiResponse, api_routes::utils as route_utils};
use serde::Serialize;

use crate::infra::errors::{AppError, EnvelopeError, EnvelopeResult};

pub(crate) type Enveloped<T> = EnvelopeResult<Json<ApiResponse<T>>>;

pub(crate) fn not_found(message: impl Into<String>) -> EnvelopeError {
    EnvelopeError(AppError::not_found(message))
}

/// `201 Created` with a `Location` header pointing at `route` for `id`.
pub(crate) fn created<T: Serialize>(
    route: &str,
    id: i32,
    body: ApiResponse<T>,
) -> Response {
    let location = route_utils::with_id(route, id);
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body))
        .into_response()
}

/// A freshly written row that cannot be read back.
pub(crate) fn vanished(entity: &str, id: i32) -> EnvelopeError {
    tracing::error!(entity, id, "row missing immediately after write");
    EnvelopeError(AppError::internal(format!(
        "{entity} with id {id} could not be loaded after saving"
    )))
}
