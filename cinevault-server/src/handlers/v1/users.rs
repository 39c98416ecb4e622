use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use cinevault_core::domain::{UserRequest, UserResponse};
use tracing::{error, info};

use crate::handlers::user_record;
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    extract::{JsonBody, PathParam},
};

pub async fn get_users(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    info!("GetUsers called");
    let users = state.unit_of_work().users.list_users().await?;
    info!(user_count = users.len(), "GetUsers completed");
    Ok(Json(users))
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<UserResponse>> {
    info!(user_id = id, "GetUserById called");
    state
        .unit_of_work()
        .users
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            error!(user_id = id, "user not found");
            AppError::not_found(format!("User with id {id} not found"))
        })
}

/// Answers 200 with an empty body.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> AppResult<StatusCode> {
    info!(username = %request.username, "CreateUser called");
    let record = user_record(&state, request).await?;
    let id = state.unit_of_work().users.create_user(&record).await?;
    info!(user_id = id, "user created");
    Ok(StatusCode::OK)
}

pub async fn update_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(request): JsonBody<UserRequest>,
) -> AppResult<StatusCode> {
    info!(user_id = id, "UpdateUser called");
    let record = user_record(&state, request).await?;
    if !state.unit_of_work().users.update_user(id, &record).await? {
        error!(user_id = id, "user not found for update");
        return Err(AppError::not_found(format!("User with id {id} not found")));
    }
    info!(user_id = id, "user updated");
    Ok(StatusCode::OK)
}

pub async fn delete_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<StatusCode> {
    info!(user_id = id, "DeleteUser called");
    if !state.unit_of_work().users.delete_user(id).await? {
        error!(user_id = id, "user not found for deletion");
        return Err(AppError::not_found(format!("User with id {id} not found")));
    }
    info!(user_id = id, "user deleted");
    Ok(StatusCode::OK)
}
