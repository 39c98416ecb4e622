use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use cinevault_core::domain::{ReviewRequest, ReviewResponse, Validate};
use tracing::{error, info};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    extract::{JsonBody, PathParam},
};

pub async fn get_reviews(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    info!("GetReviews called");
    let reviews = state.unit_of_work().reviews.list_reviews().await?;
    info!(review_count = reviews.len(), "GetReviews completed");
    Ok(Json(reviews))
}

pub async fn get_review_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<ReviewResponse>> {
    info!(review_id = id, "GetReviewById called");
    state
        .unit_of_work()
        .reviews
        .get_review(id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            error!(review_id = id, "review not found");
            AppError::not_found(format!("Review with id {id} not found"))
        })
}

pub async fn create_review(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ReviewRequest>,
) -> AppResult<StatusCode> {
    info!(
        movie_id = request.movie_id,
        user_id = request.user_id,
        "CreateReview called"
    );
    request.validate()?;
    let id = state.unit_of_work().reviews.create_review(&request).await?;
    info!(review_id = id, "review created");
    Ok(StatusCode::CREATED)
}

pub async fn update_review(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(request): JsonBody<ReviewRequest>,
) -> AppResult<StatusCode> {
    info!(review_id = id, "UpdateReview called");
    request.validate()?;
    if !state.unit_of_work().reviews.update_review(id, &request).await? {
        error!(review_id = id, "review not found for update");
        return Err(AppError::not_found(format!("Review with id {id} not found")));
    }
    info!(review_id = id, "review updated");
    Ok(StatusCode::OK)
}

pub async fn delete_review(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<StatusCode> {
    info!(review_id = id, "DeleteReview called");
    if !state.unit_of_work().reviews.delete_review(id).await? {
        error!(review_id = id, "review not found for deletion");
        return Err(AppError::not_found(format!("Review with id {id} not found")));
    }
    info!(review_id = id, "review deleted");
    Ok(StatusCode::OK)
}
