use axum::{
    Json,
    extract::State,
    response::Response,
};
use cinevault_core::{
    ApiRequest, ApiRequestMeta, ApiResponse, api_routes,
    domain::{ReviewRequest, ReviewResponse, Validate},
};
use tracing::{info, warn};

use super::{Enveloped, created, not_found, vanished};
use crate::infra::{
    app_state::AppState,
    errors::EnvelopeResult,
    extract::{Envelope, EnvelopePath},
};

pub async fn get_reviews(
    State(state): State<AppState>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<Vec<ReviewResponse>> {
    info!(request_id = %meta.request_id, caller = %meta.username, "GetReviews (v2) called");
    let reviews = state.unit_of_work().reviews.list_reviews().await?;
    info!(request_id = %meta.request_id, review_count = reviews.len(), "GetReviews (v2) completed");
    Ok(Json(ApiResponse::ok("OK", reviews)))
}

pub async fn get_review_by_id(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<ReviewResponse> {
    info!(request_id = %meta.request_id, review_id = id, "GetReviewById (v2) called");
    let Some(review) = state.unit_of_work().reviews.get_review(id).await? else {
        warn!(request_id = %meta.request_id, review_id = id, "GetReviewById (v2): review not found");
        return Err(not_found("Not Found"));
    };
    Ok(Json(ApiResponse::ok("OK", review)))
}

pub async fn create_review(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<ReviewRequest>>,
) -> EnvelopeResult<Response> {
    let ApiRequest { meta, data } = request;
    info!(
        request_id = %meta.request_id,
        movie_id = data.movie_id,
        user_id = data.user_id,
        rating = data.rating,
        "CreateReview (v2) called"
    );
    data.validate()?;

    let reviews = &state.unit_of_work().reviews;
    let id = reviews.create_review(&data).await?;
    let review = reviews
        .get_review(id)
        .await?
        .ok_or_else(|| vanished("Review", id))?;

    info!(request_id = %meta.request_id, review_id = id, "CreateReview (v2) completed");
    Ok(created(
        api_routes::v2::reviews::GET,
        id,
        ApiResponse::created("Created", review),
    ))
}

pub async fn update_review(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(request): Envelope<ApiRequest<ReviewRequest>>,
) -> Enveloped<ReviewResponse> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, review_id = id, "UpdateReview (v2) called");
    data.validate()?;

    let reviews = &state.unit_of_work().reviews;
    if !reviews.update_review(id, &data).await? {
        warn!(request_id = %meta.request_id, review_id = id, "UpdateReview (v2): review not found");
        return Err(not_found("Not Found"));
    }
    let review = reviews
        .get_review(id)
        .await?
        .ok_or_else(|| vanished("Review", id))?;

    info!(request_id = %meta.request_id, review_id = id, "UpdateReview (v2) completed");
    Ok(Json(ApiResponse::ok("OK", review)))
}

pub async fn delete_review(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<String> {
    info!(request_id = %meta.request_id, review_id = id, "DeleteReview (v2) called");
    if !state.unit_of_work().reviews.delete_review(id).await? {
        warn!(request_id = %meta.request_id, review_id = id, "DeleteReview (v2): review not found");
        return Err(not_found("Not Found"));
    }
    info!(request_id = %meta.request_id, review_id = id, "DeleteReview (v2) completed");
    Ok(Json(ApiResponse::ok("OK", "Deleted".to_string())))
}
