use axum::{
    Json,
    extract::State,
    response::Response,
};
use cinevault_core::{
    ApiRequest, ApiRequestMeta, ApiResponse, api_routes,
    domain::{LikeRequest, LikeResponse},
};
use tracing::{info, warn};

use super::{Enveloped, created, not_found, vanished};
use crate::infra::{
    app_state::AppState,
    errors::EnvelopeResult,
    extract::{Envelope, EnvelopePath},
};

const LIKE_NOT_FOUND: &str = "Like is not found";

pub async fn get_likes(
    State(state): State<AppState>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<Vec<LikeResponse>> {
    info!(request_id = %meta.request_id, caller = %meta.username, "GetLikes (v2) called");
    let likes = state.unit_of_work().likes.list_likes().await?;
    info!(request_id = %meta.request_id, like_count = likes.len(), "GetLikes (v2) completed");
    Ok(Json(ApiResponse::ok("Likes are received", likes)))
}

pub async fn get_like_by_id(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<LikeResponse> {
    info!(request_id = %meta.request_id, like_id = id, "GetLikeById (v2) called");
    let Some(like) = state.unit_of_work().likes.get_like(id).await? else {
        warn!(request_id = %meta.request_id, like_id = id, "GetLikeById (v2): like not found");
        return Err(not_found(LIKE_NOT_FOUND));
    };
    Ok(Json(ApiResponse::ok("Like is received", like)))
}

pub async fn create_like(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<LikeRequest>>,
) -> EnvelopeResult<Response> {
    let ApiRequest { meta, data } = request;
    info!(
        request_id = %meta.request_id,
        review_id = data.review_id,
        user_id = data.user_id,
        "CreateLike (v2) called"
    );

    let likes = &state.unit_of_work().likes;
    let id = likes.create_like(&data).await?;
    let like = likes
        .get_like(id)
        .await?
        .ok_or_else(|| vanished("Like", id))?;

    info!(request_id = %meta.request_id, like_id = id, "CreateLike (v2) completed");
    Ok(created(
        api_routes::v2::likes::GET,
        id,
        ApiResponse::created("Like is created", like),
    ))
}

pub async fn delete_like(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<()> {
    info!(request_id = %meta.request_id, like_id = id, "DeleteLike (v2) called");
    if !state.unit_of_work().likes.delete_like(id).await? {
        warn!(request_id = %meta.request_id, like_id = id, "DeleteLike (v2): like not found");
        return Err(not_found(LIKE_NOT_FOUND));
    }
    info!(request_id = %meta.request_id, like_id = id, "DeleteLike (v2) completed");
    Ok(Json(ApiResponse::message(200, "Like is deleted")))
}
