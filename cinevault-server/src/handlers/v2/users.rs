use axum::{
    Json,
    extract::State,
    response::Response,
};
use cinevault_core::{
    ApiRequest, ApiRequestMeta, ApiResponse, Page, api_routes,
    domain::{
        SearchUsersRequest, UserQuery, UserRequest, UserResponse,
        UserStatsResponse,
    },
};
use tracing::{info, warn};

use super::{Enveloped, created, not_found, vanished};
use crate::handlers::user_record;
use crate::infra::{
    app_state::AppState,
    errors::EnvelopeResult,
    extract::{Envelope, EnvelopePath},
};

pub async fn get_users(
    State(state): State<AppState>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<Vec<UserResponse>> {
    info!(request_id = %meta.request_id, caller = %meta.username, "GetUsers (v2) called");
    let users = state.unit_of_work().users.list_users().await?;
    info!(request_id = %meta.request_id, user_count = users.len(), "GetUsers (v2) completed");
    Ok(Json(ApiResponse::ok("OK", users)))
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<UserResponse> {
    info!(request_id = %meta.request_id, user_id = id, "GetUserById (v2) called");
    let Some(user) = state.unit_of_work().users.get_user(id).await? else {
        warn!(request_id = %meta.request_id, user_id = id, "GetUserById (v2): user not found");
        return Err(not_found("Not Found"));
    };
    Ok(Json(ApiResponse::ok("OK", user)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<UserRequest>>,
) -> EnvelopeResult<Response> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, username = %data.username, "CreateUser (v2) called");

    let record = user_record(&state, data).await?;
    let users = &state.unit_of_work().users;
    let id = users.create_user(&record).await?;
    let user = users
        .get_user(id)
        .await?
        .ok_or_else(|| vanished("User", id))?;

    info!(request_id = %meta.request_id, user_id = id, "CreateUser (v2) completed");
    Ok(created(
        api_routes::v2::users::GET,
        id,
        ApiResponse::created("Created", user),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(request): Envelope<ApiRequest<UserRequest>>,
) -> Enveloped<UserResponse> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, user_id = id, "UpdateUser (v2) called");

    let record = user_record(&state, data).await?;
    let users = &state.unit_of_work().users;
    if !users.update_user(id, &record).await? {
        warn!(request_id = %meta.request_id, user_id = id, "UpdateUser (v2): user not found");
        return Err(not_found("Not Found"));
    }
    let user = users
        .get_user(id)
        .await?
        .ok_or_else(|| vanished("User", id))?;

    info!(request_id = %meta.request_id, user_id = id, "UpdateUser (v2) completed");
    Ok(Json(ApiResponse::ok("OK", user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<String> {
    info!(request_id = %meta.request_id, user_id = id, "DeleteUser (v2) called");
    if !state.unit_of_work().users.delete_user(id).await? {
        warn!(request_id = %meta.request_id, user_id = id, "DeleteUser (v2): user not found");
        return Err(not_found("Not Found"));
    }
    info!(request_id = %meta.request_id, user_id = id, "DeleteUser (v2) completed");
    Ok(Json(ApiResponse::ok("OK", "Deleted".to_string())))
}

pub async fn search_users(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<SearchUsersRequest>>,
) -> Enveloped<Page<UserResponse>> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, criteria = ?data, "SearchUsers (v2) called");

    let query = UserQuery::try_from(data)?;
    if let Some(term) = &query.search_term {
        info!(request_id = %meta.request_id, search_term = %term, "SearchUsers: filtering by username or email");
    }
    if let Some(after) = query.created_after {
        info!(request_id = %meta.request_id, created_after = %after, "SearchUsers: filtering by creation date");
    }
    if let Some(before) = query.created_before {
        info!(request_id = %meta.request_id, created_before = %before, "SearchUsers: filtering by creation date");
    }

    let page = state.unit_of_work().users.search_users(&query).await?;
    info!(
        request_id = %meta.request_id,
        total_count = page.total_count,
        page_number = page.page_number,
        returned = page.items.len(),
        "SearchUsers (v2) completed"
    );
    Ok(Json(ApiResponse::ok("Users are received", page)))
}

pub async fn get_user_stats(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<UserStatsResponse> {
    info!(request_id = %meta.request_id, user_id = id, "GetUserStats (v2) called");
    let Some(stats) = state.unit_of_work().users.user_stats(id).await? else {
        warn!(request_id = %meta.request_id, user_id = id, "GetUserStats (v2): user not found");
        return Err(not_found("User is not found"));
    };

    info!(
        request_id = %meta.request_id,
        user_id = id,
        total_reviews = stats.total_reviews,
        "GetUserStats (v2) completed"
    );
    Ok(Json(ApiResponse::ok("User stats are received", stats)))
}
